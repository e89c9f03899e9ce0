//! Wire protocol for the realtime practice channel.
//!
//! Every frame is a JSON object with an `"event"` tag and an optional
//! `"data"` payload. The event vocabulary is a closed set on both
//! directions; anything else is rejected at the boundary with a
//! [`ParleyError::FrameDecode`] instead of leaking into the state machines.

use parley_core::error::{ParleyError, Result};
use parley_core::models::Profile;
use serde::{Deserialize, Serialize};

// ── Outbound events ───────────────────────────────────────────────────────────

/// Events the client emits to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Request the signed-in user's profile snapshot.
    GetProfile { user_id: String },
    /// Open a conversation context for a scenario.
    StartConversation { scenario_id: String, user_id: String },
    /// Forward one user utterance into the active conversation.
    SendMessage { text: String },
}

// ── Inbound events ────────────────────────────────────────────────────────────

/// Events the backend pushes to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Full profile snapshot; replaces any previously held profile.
    ProfileData(Profile),
    /// A conversation finished; carries the updated daily count only.
    ConversationCompleted { daily_conversations: u32 },
    /// A complete agent utterance delivered in one piece.
    AgentMessage { text: String },
    /// One fragment of a streaming agent utterance.
    AgentMessageChunk { text: String },
    /// Terminator for the current streaming utterance.
    AgentMessageEnd,
    /// The free daily conversation allowance is spent.
    LimitReached,
    /// A backend-side failure the user should see.
    Error { message: String },
}

// ── Boundary codec ────────────────────────────────────────────────────────────

/// Serialise an outbound event to its JSON text frame.
pub fn encode_client_event(event: &ClientEvent) -> Result<String> {
    serde_json::to_string(event).map_err(ParleyError::from)
}

/// Parse an inbound text frame, rejecting anything outside the closed
/// [`ServerEvent`] vocabulary.
pub fn decode_server_event(frame: &str) -> Result<ServerEvent> {
    serde_json::from_str(frame).map_err(|e| ParleyError::FrameDecode(format!("{e}: {frame}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Outbound encoding ──────────────────────────────────────────────────

    #[test]
    fn test_encode_get_profile() {
        let frame = encode_client_event(&ClientEvent::GetProfile {
            user_id: "u-1".to_string(),
        })
        .unwrap();
        assert_eq!(frame, r#"{"event":"get-profile","data":{"user_id":"u-1"}}"#);
    }

    #[test]
    fn test_encode_start_conversation() {
        let frame = encode_client_event(&ClientEvent::StartConversation {
            scenario_id: "coffee-shop".to_string(),
            user_id: "u-1".to_string(),
        })
        .unwrap();
        assert_eq!(
            frame,
            r#"{"event":"start-conversation","data":{"scenario_id":"coffee-shop","user_id":"u-1"}}"#
        );
    }

    #[test]
    fn test_encode_send_message() {
        let frame = encode_client_event(&ClientEvent::SendMessage {
            text: "One flat white, please.".to_string(),
        })
        .unwrap();
        assert!(frame.starts_with(r#"{"event":"send-message""#));
        assert!(frame.contains("One flat white, please."));
    }

    // ── Inbound decoding ───────────────────────────────────────────────────

    #[test]
    fn test_decode_profile_data() {
        let frame = r#"{"event":"profile-data","data":{"id":"u-1","streak":4,"daily_conversations":1,"is_premium":false}}"#;
        let event = decode_server_event(frame).unwrap();
        match event {
            ServerEvent::ProfileData(p) => {
                assert_eq!(p.id, "u-1");
                assert_eq!(p.streak, 4);
                assert_eq!(p.daily_conversations, 1);
                assert!(!p.is_premium);
            }
            other => panic!("expected profile-data, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_conversation_completed() {
        let frame = r#"{"event":"conversation-completed","data":{"daily_conversations":2}}"#;
        assert_eq!(
            decode_server_event(frame).unwrap(),
            ServerEvent::ConversationCompleted {
                daily_conversations: 2
            }
        );
    }

    #[test]
    fn test_decode_agent_message() {
        let frame = r#"{"event":"agent-message","data":{"text":"Welcome to the cafe!"}}"#;
        assert_eq!(
            decode_server_event(frame).unwrap(),
            ServerEvent::AgentMessage {
                text: "Welcome to the cafe!".to_string()
            }
        );
    }

    #[test]
    fn test_decode_agent_message_chunk() {
        let frame = r#"{"event":"agent-message-chunk","data":{"text":"Wel"}}"#;
        assert_eq!(
            decode_server_event(frame).unwrap(),
            ServerEvent::AgentMessageChunk {
                text: "Wel".to_string()
            }
        );
    }

    #[test]
    fn test_decode_agent_message_end_without_payload() {
        let frame = r#"{"event":"agent-message-end"}"#;
        assert_eq!(decode_server_event(frame).unwrap(), ServerEvent::AgentMessageEnd);
    }

    #[test]
    fn test_decode_limit_reached_without_payload() {
        let frame = r#"{"event":"limit-reached"}"#;
        assert_eq!(decode_server_event(frame).unwrap(), ServerEvent::LimitReached);
    }

    #[test]
    fn test_decode_error_event() {
        let frame = r#"{"event":"error","data":{"message":"inference backend unavailable"}}"#;
        assert_eq!(
            decode_server_event(frame).unwrap(),
            ServerEvent::Error {
                message: "inference backend unavailable".to_string()
            }
        );
    }

    // ── Boundary rejection ─────────────────────────────────────────────────

    #[test]
    fn test_decode_unknown_tag_rejected() {
        let err = decode_server_event(r#"{"event":"poke"}"#).unwrap_err();
        assert!(matches!(err, ParleyError::FrameDecode(_)));
        assert!(err.to_string().contains("poke"));
    }

    #[test]
    fn test_decode_malformed_json_rejected() {
        let err = decode_server_event("{not json").unwrap_err();
        assert!(matches!(err, ParleyError::FrameDecode(_)));
    }

    #[test]
    fn test_decode_missing_payload_rejected() {
        // agent-message requires a text payload.
        let err = decode_server_event(r#"{"event":"agent-message"}"#).unwrap_err();
        assert!(matches!(err, ParleyError::FrameDecode(_)));
    }

    #[test]
    fn test_decode_client_tag_not_accepted_inbound() {
        // Outbound vocabulary must not decode as a server event.
        let err =
            decode_server_event(r#"{"event":"send-message","data":{"text":"hi"}}"#).unwrap_err();
        assert!(matches!(err, ParleyError::FrameDecode(_)));
    }

    // ── Round trips ────────────────────────────────────────────────────────

    #[test]
    fn test_server_event_round_trip_all_tags() {
        let events = vec![
            ServerEvent::ProfileData(Profile {
                id: "u-9".to_string(),
                streak: 1,
                daily_conversations: 0,
                is_premium: true,
            }),
            ServerEvent::ConversationCompleted {
                daily_conversations: 3,
            },
            ServerEvent::AgentMessage {
                text: "done".to_string(),
            },
            ServerEvent::AgentMessageChunk {
                text: "d".to_string(),
            },
            ServerEvent::AgentMessageEnd,
            ServerEvent::LimitReached,
            ServerEvent::Error {
                message: "boom".to_string(),
            },
        ];
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let back = decode_server_event(&json).unwrap();
            assert_eq!(back, event);
        }
    }
}
