use serde::{Deserialize, Serialize};

/// Server-sourced user record driving gating and stats display.
///
/// Owned by the profile store; replaced wholesale on each `profile-data`
/// event from the backend and read-only to every view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Opaque user identifier assigned by the identity service.
    pub id: String,
    /// Consecutive practice days.
    #[serde(default)]
    pub streak: u32,
    /// Conversations completed so far today.
    #[serde(default)]
    pub daily_conversations: u32,
    /// Whether the account is on the premium tier.
    #[serde(default)]
    pub is_premium: bool,
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    /// The signed-in user.
    User,
    /// The practice agent on the other end of the channel.
    Agent,
}

/// One entry in a conversation transcript.
///
/// Immutable once appended, except the most recent agent message while a
/// response is still streaming (`complete == false`): its text grows by
/// fragment concatenation until the end-of-stream signal seals it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the message.
    pub sender: MessageSender,
    /// Message text; grows incrementally while streaming.
    pub text: String,
    /// `false` only while this message is receiving streamed fragments.
    pub complete: bool,
}

impl Message {
    /// A finished message from the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: MessageSender::User,
            text: text.into(),
            complete: true,
        }
    }

    /// A finished message from the agent.
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            sender: MessageSender::Agent,
            text: text.into(),
            complete: true,
        }
    }

    /// An agent message still receiving streamed fragments.
    pub fn agent_streaming(text: impl Into<String>) -> Self {
        Self {
            sender: MessageSender::Agent,
            text: text.into(),
            complete: false,
        }
    }

    /// `true` for an agent message that is still receiving fragments.
    pub fn is_open_agent(&self) -> bool {
        self.sender == MessageSender::Agent && !self.complete
    }
}

/// How demanding a practice scenario is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::str::FromStr for Difficulty {
    type Err = crate::error::ParleyError;

    /// Case-insensitive construction from a string slice.
    ///
    /// Accepts `"easy"`, `"medium"`, and `"hard"`. Returns
    /// [`ParleyError::InvalidDifficulty`](crate::error::ParleyError) for
    /// anything else.
    fn from_str(value: &str) -> crate::error::Result<Self> {
        match value.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(crate::error::ParleyError::InvalidDifficulty(
                other.to_string(),
            )),
        }
    }
}

impl Difficulty {
    /// The canonical display label for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// A static catalog entry describing a practice topic.
///
/// Defined at build time; never persisted or mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Stable identifier used in routes and wire events.
    pub id: &'static str,
    /// Display title.
    pub title: &'static str,
    /// One-sentence pitch shown on the scenario card.
    pub description: &'static str,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Suggested session length in minutes.
    pub duration_minutes: u32,
    /// Whether the scenario requires a premium account.
    pub premium: bool,
    /// Cover image reference (URL; the terminal client shows it as a caption).
    pub image: &'static str,
}

impl Scenario {
    /// Human-readable duration label (e.g. `"10 min"`).
    pub fn duration_label(&self) -> String {
        format!("{} min", self.duration_minutes)
    }

    /// Route-style title derived from the id (`"job-interview"` → `"job interview"`).
    pub fn route_title(&self) -> String {
        self.id.replace('-', " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Profile ────────────────────────────────────────────────────────────

    #[test]
    fn test_profile_deserialize_full() {
        let json = r#"{"id":"u-1","streak":4,"daily_conversations":2,"is_premium":true}"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, "u-1");
        assert_eq!(p.streak, 4);
        assert_eq!(p.daily_conversations, 2);
        assert!(p.is_premium);
    }

    #[test]
    fn test_profile_deserialize_defaults() {
        // Everything except the id is defaulted when absent.
        let p: Profile = serde_json::from_str(r#"{"id":"u-2"}"#).unwrap();
        assert_eq!(p.streak, 0);
        assert_eq!(p.daily_conversations, 0);
        assert!(!p.is_premium);
    }

    // ── Message ────────────────────────────────────────────────────────────

    #[test]
    fn test_message_user_is_complete() {
        let m = Message::user("hello");
        assert_eq!(m.sender, MessageSender::User);
        assert!(m.complete);
        assert!(!m.is_open_agent());
    }

    #[test]
    fn test_message_agent_streaming_is_open() {
        let m = Message::agent_streaming("Hi");
        assert_eq!(m.sender, MessageSender::Agent);
        assert!(!m.complete);
        assert!(m.is_open_agent());
    }

    #[test]
    fn test_message_agent_complete_is_not_open() {
        let m = Message::agent("done");
        assert!(m.complete);
        assert!(!m.is_open_agent());
    }

    #[test]
    fn test_message_sender_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&MessageSender::User).unwrap(),
            r#""user""#
        );
        assert_eq!(
            serde_json::to_string(&MessageSender::Agent).unwrap(),
            r#""agent""#
        );
    }

    // ── Difficulty ─────────────────────────────────────────────────────────

    #[test]
    fn test_difficulty_from_str_valid() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("MEDIUM".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    }

    #[test]
    fn test_difficulty_from_str_invalid() {
        let err = "impossible".parse::<Difficulty>().unwrap_err();
        assert!(err.to_string().contains("impossible"));
    }

    #[test]
    fn test_difficulty_as_str() {
        assert_eq!(Difficulty::Easy.as_str(), "Easy");
        assert_eq!(Difficulty::Medium.as_str(), "Medium");
        assert_eq!(Difficulty::Hard.as_str(), "Hard");
    }

    // ── Scenario ───────────────────────────────────────────────────────────

    fn sample_scenario() -> Scenario {
        Scenario {
            id: "job-interview",
            title: "Job Interview",
            description: "Practice common interview questions.",
            difficulty: Difficulty::Medium,
            duration_minutes: 10,
            premium: false,
            image: "https://example.com/interview.jpg",
        }
    }

    #[test]
    fn test_scenario_duration_label() {
        assert_eq!(sample_scenario().duration_label(), "10 min");
    }

    #[test]
    fn test_scenario_route_title_replaces_dashes() {
        assert_eq!(sample_scenario().route_title(), "job interview");
    }
}
