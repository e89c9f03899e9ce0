//! Session-scoped profile store.
//!
//! [`ProfileStore`] holds the authenticated user's [`Profile`]: replaced
//! wholesale on every `profile-data` event and patched in place when a
//! `conversation-completed` event reports a new daily count. Views read it,
//! never write it.

use parley_core::models::Profile;
use parley_net::protocol::ServerEvent;

/// Holder for the server-sourced profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profile: Option<Profile>,
}

impl ProfileStore {
    /// Create an empty store (no profile received yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// The current profile, if one has arrived.
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Apply one inbound event. Returns `true` when the stored profile
    /// changed, so the caller knows to push an update to the views.
    pub fn apply(&mut self, event: &ServerEvent) -> bool {
        match event {
            ServerEvent::ProfileData(profile) => {
                tracing::debug!(user_id = %profile.id, "profile replaced");
                self.profile = Some(profile.clone());
                true
            }
            ServerEvent::ConversationCompleted {
                daily_conversations,
            } => match self.profile.as_mut() {
                Some(profile) => {
                    profile.daily_conversations = *daily_conversations;
                    true
                }
                // Nothing to patch before the first snapshot arrives.
                None => false,
            },
            _ => false,
        }
    }

    /// Forget the profile (sign-out or identity loss).
    pub fn clear(&mut self) {
        self.profile = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_event(daily: u32) -> ServerEvent {
        ServerEvent::ProfileData(Profile {
            id: "u-1".to_string(),
            streak: 5,
            daily_conversations: daily,
            is_premium: false,
        })
    }

    #[test]
    fn test_store_starts_empty() {
        assert!(ProfileStore::new().profile().is_none());
    }

    #[test]
    fn test_profile_data_replaces_wholesale() {
        let mut store = ProfileStore::new();
        assert!(store.apply(&profile_event(1)));
        assert_eq!(store.profile().unwrap().daily_conversations, 1);

        // A second snapshot replaces everything, not merges.
        assert!(store.apply(&ServerEvent::ProfileData(Profile {
            id: "u-1".to_string(),
            streak: 6,
            daily_conversations: 0,
            is_premium: true,
        })));
        let p = store.profile().unwrap();
        assert_eq!(p.streak, 6);
        assert_eq!(p.daily_conversations, 0);
        assert!(p.is_premium);
    }

    #[test]
    fn test_conversation_completed_patches_daily_count_only() {
        let mut store = ProfileStore::new();
        store.apply(&profile_event(1));

        assert!(store.apply(&ServerEvent::ConversationCompleted {
            daily_conversations: 2
        }));

        let p = store.profile().unwrap();
        assert_eq!(p.daily_conversations, 2);
        // Everything else is untouched.
        assert_eq!(p.streak, 5);
        assert!(!p.is_premium);
    }

    #[test]
    fn test_conversation_completed_without_profile_is_noop() {
        let mut store = ProfileStore::new();
        assert!(!store.apply(&ServerEvent::ConversationCompleted {
            daily_conversations: 2
        }));
        assert!(store.profile().is_none());
    }

    #[test]
    fn test_chat_events_do_not_change_profile() {
        let mut store = ProfileStore::new();
        store.apply(&profile_event(1));

        assert!(!store.apply(&ServerEvent::AgentMessage {
            text: "hi".to_string()
        }));
        assert!(!store.apply(&ServerEvent::AgentMessageEnd));
        assert!(!store.apply(&ServerEvent::LimitReached));
        assert_eq!(store.profile().unwrap().daily_conversations, 1);
    }

    #[test]
    fn test_clear_forgets_profile() {
        let mut store = ProfileStore::new();
        store.apply(&profile_event(1));
        store.clear();
        assert!(store.profile().is_none());
    }
}
