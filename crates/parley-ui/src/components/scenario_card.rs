use crate::themes::Theme;
use parley_core::gating::{LockReason, ScenarioGate};
use parley_core::models::Scenario;
use ratatui::text::{Line, Span};

/// One scenario card in the dashboard carousel.
///
/// Renders the scenario title, description, difficulty/duration meta row and
/// an action row whose label depends on the gate: `Start` when open,
/// `Upgrade ✨` for premium scenarios, `Locked 🔒` when the daily allowance
/// is spent.
pub struct ScenarioCard<'a> {
    /// The catalog entry to render.
    pub scenario: &'a Scenario,
    /// Gate evaluated for the current profile.
    pub gate: ScenarioGate,
    /// Theme providing colour styles.
    pub theme: &'a Theme,
}

impl<'a> ScenarioCard<'a> {
    /// Construct a new card.
    pub fn new(scenario: &'a Scenario, gate: ScenarioGate, theme: &'a Theme) -> Self {
        Self {
            scenario,
            gate,
            theme,
        }
    }

    /// The action label for the current gate.
    pub fn action_label(&self) -> &'static str {
        match self.gate {
            ScenarioGate::Open => "Start  ⏎",
            ScenarioGate::Locked(LockReason::Premium) => "Upgrade ✨",
            ScenarioGate::Locked(LockReason::DailyLimit) => "Locked 🔒",
        }
    }

    /// Render the card body as lines (title, description, meta, blank,
    /// action).
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let title_style = match self.gate {
            ScenarioGate::Locked(LockReason::DailyLimit) => self.theme.card_locked,
            _ => self.theme.card_title,
        };

        let mut title_spans = vec![Span::styled(self.scenario.title, title_style)];
        if self.scenario.premium {
            title_spans.push(Span::styled(" ✨", self.theme.card_premium));
        }

        let action_style = match self.gate {
            ScenarioGate::Open => self.theme.value,
            ScenarioGate::Locked(LockReason::Premium) => self.theme.card_premium,
            ScenarioGate::Locked(LockReason::DailyLimit) => self.theme.card_locked,
        };

        vec![
            Line::from(title_spans),
            Line::from(Span::styled(
                self.scenario.description,
                self.theme.card_description,
            )),
            Line::from(vec![
                Span::styled(
                    self.scenario.difficulty.as_str(),
                    self.theme.difficulty_style(self.scenario.difficulty),
                ),
                Span::styled(" • ", self.theme.card_meta),
                Span::styled(self.scenario.duration_label(), self.theme.card_meta),
            ]),
            Line::from(""),
            Line::from(Span::styled(self.action_label(), action_style)),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
