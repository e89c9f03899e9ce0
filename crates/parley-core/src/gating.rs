//! Dashboard gating rules and progress calculations.
//!
//! Everything here is a pure function of [`Profile`] (and, for scenario
//! gates, the [`Scenario`] itself) so the rules can be tested without any
//! channel or view machinery.

use crate::models::{Profile, Scenario};

/// Free conversations allowed per day for non-premium accounts.
pub const DAILY_CONVERSATION_LIMIT: u32 = 3;

/// Length of the streak progress cycle in days.
pub const STREAK_CYCLE_DAYS: u32 = 7;

// ── Lock reasons ──────────────────────────────────────────────────────────────

/// Why a scenario cannot be started right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReason {
    /// The free daily conversation allowance is used up.
    DailyLimit,
    /// The scenario itself is a premium feature.
    Premium,
}

/// Result of evaluating a scenario against the current profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioGate {
    /// Selecting the scenario navigates into a conversation.
    Open,
    /// Selecting the scenario opens the upgrade modal instead.
    Locked(LockReason),
}

// ── Gating rules ──────────────────────────────────────────────────────────────

/// `true` when the daily conversation count has hit the fixed limit.
///
/// This is the raw count check; premium accounts bypass its *effect* (see
/// [`usage_exhausted`]) but the count itself still reads as reached.
pub fn daily_limit_reached(profile: &Profile) -> bool {
    profile.daily_conversations >= DAILY_CONVERSATION_LIMIT
}

/// `true` when the user can start no further free conversations today.
///
/// Premium accounts are never exhausted regardless of the count.
pub fn usage_exhausted(profile: &Profile) -> bool {
    daily_limit_reached(profile) && !profile.is_premium
}

/// Evaluate whether `scenario` may be started under `profile`.
///
/// Premium-flagged scenarios are always locked behind the upgrade modal,
/// regardless of usage count or the account's own premium flag. Otherwise a
/// scenario is locked only while the free daily allowance is exhausted.
pub fn evaluate(profile: &Profile, scenario: &Scenario) -> ScenarioGate {
    if scenario.premium {
        return ScenarioGate::Locked(LockReason::Premium);
    }
    if usage_exhausted(profile) {
        return ScenarioGate::Locked(LockReason::DailyLimit);
    }
    ScenarioGate::Open
}

// ── Progress calculations ─────────────────────────────────────────────────────

/// Position within the current 7-day streak cycle as a percentage.
///
/// Day 1 of a cycle is 0 %, day 7 is 100 %; day 8 starts the next cycle at
/// 0 % again. A zero streak reads as 0 %.
pub fn streak_progress(streak: u32) -> f64 {
    if streak == 0 {
        return 0.0;
    }
    let in_cycle = (streak - 1) % STREAK_CYCLE_DAYS;
    in_cycle as f64 / (STREAK_CYCLE_DAYS - 1) as f64 * 100.0
}

/// Today's usage as a percentage of the daily limit, capped at 100 %.
pub fn daily_progress(profile: &Profile) -> f64 {
    (profile.daily_conversations as f64 / DAILY_CONVERSATION_LIMIT as f64 * 100.0).min(100.0)
}

/// Free conversations left today (0 when the limit is reached or passed).
pub fn conversations_remaining(profile: &Profile) -> u32 {
    DAILY_CONVERSATION_LIMIT.saturating_sub(profile.daily_conversations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn profile(daily: u32, premium: bool) -> Profile {
        Profile {
            id: "u-1".to_string(),
            streak: 3,
            daily_conversations: daily,
            is_premium: premium,
        }
    }

    // ── daily_limit_reached ────────────────────────────────────────────────

    #[test]
    fn test_daily_limit_not_reached_below_limit() {
        assert!(!daily_limit_reached(&profile(0, false)));
        assert!(!daily_limit_reached(&profile(2, false)));
    }

    #[test]
    fn test_daily_limit_reached_at_limit() {
        assert!(daily_limit_reached(&profile(3, false)));
    }

    #[test]
    fn test_daily_limit_reached_above_limit() {
        assert!(daily_limit_reached(&profile(7, false)));
    }

    // ── usage_exhausted ────────────────────────────────────────────────────

    #[test]
    fn test_usage_exhausted_free_account_at_limit() {
        assert!(usage_exhausted(&profile(3, false)));
    }

    #[test]
    fn test_usage_never_exhausted_for_premium() {
        assert!(!usage_exhausted(&profile(3, true)));
        assert!(!usage_exhausted(&profile(99, true)));
    }

    // ── evaluate ───────────────────────────────────────────────────────────

    #[test]
    fn test_evaluate_open_scenario_under_limit() {
        let s = Catalog::require("coffee-shop").unwrap();
        assert_eq!(evaluate(&profile(2, false), s), ScenarioGate::Open);
    }

    #[test]
    fn test_evaluate_daily_limit_locks_every_free_scenario() {
        let p = profile(3, false);
        for s in Catalog::all().iter().filter(|s| !s.premium) {
            assert_eq!(
                evaluate(&p, s),
                ScenarioGate::Locked(LockReason::DailyLimit),
                "scenario {}",
                s.id
            );
        }
    }

    #[test]
    fn test_evaluate_premium_account_never_daily_gated() {
        let p = profile(3, true);
        for s in Catalog::all().iter().filter(|s| !s.premium) {
            assert_eq!(evaluate(&p, s), ScenarioGate::Open, "scenario {}", s.id);
        }
    }

    #[test]
    fn test_evaluate_premium_scenario_always_locked() {
        let s = Catalog::require("debate-club").unwrap();
        // Regardless of usage count or the account's own premium flag.
        assert_eq!(
            evaluate(&profile(0, false), s),
            ScenarioGate::Locked(LockReason::Premium)
        );
        assert_eq!(
            evaluate(&profile(3, false), s),
            ScenarioGate::Locked(LockReason::Premium)
        );
        assert_eq!(
            evaluate(&profile(0, true), s),
            ScenarioGate::Locked(LockReason::Premium)
        );
    }

    #[test]
    fn test_evaluate_premium_lock_wins_over_daily_limit() {
        let s = Catalog::require("debate-club").unwrap();
        assert_eq!(
            evaluate(&profile(3, false), s),
            ScenarioGate::Locked(LockReason::Premium)
        );
    }

    // ── streak_progress ────────────────────────────────────────────────────

    #[test]
    fn test_streak_progress_zero_streak() {
        assert_eq!(streak_progress(0), 0.0);
    }

    #[test]
    fn test_streak_progress_cycle_boundaries() {
        assert!((streak_progress(1) - 0.0).abs() < f64::EPSILON);
        assert!((streak_progress(4) - 50.0).abs() < f64::EPSILON);
        assert!((streak_progress(7) - 100.0).abs() < f64::EPSILON);
        // Day 8 wraps into a fresh cycle.
        assert!((streak_progress(8) - 0.0).abs() < f64::EPSILON);
    }

    // ── daily_progress ─────────────────────────────────────────────────────

    #[test]
    fn test_daily_progress_values() {
        assert!((daily_progress(&profile(0, false)) - 0.0).abs() < f64::EPSILON);
        assert!((daily_progress(&profile(2, false)) - 66.666).abs() < 0.01);
        assert!((daily_progress(&profile(3, false)) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_daily_progress_caps_at_hundred() {
        assert!((daily_progress(&profile(9, false)) - 100.0).abs() < f64::EPSILON);
    }

    // ── conversations_remaining ────────────────────────────────────────────

    #[test]
    fn test_conversations_remaining() {
        assert_eq!(conversations_remaining(&profile(0, false)), 3);
        assert_eq!(conversations_remaining(&profile(2, false)), 1);
        assert_eq!(conversations_remaining(&profile(3, false)), 0);
        assert_eq!(conversations_remaining(&profile(5, false)), 0);
    }
}
