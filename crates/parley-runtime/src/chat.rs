//! Chat session state machine and transcript assembly.
//!
//! [`ChatSession`] owns one conversation's transcript and phase. It consumes
//! inbound [`ServerEvent`]s and user submissions, producing the outbound
//! events to emit and [`ChatSignal`]s the presentation layer must react to.
//! The transcript invariant: at most one message is open (receiving streamed
//! fragments) at any time, and a sealed message is never mutated again.

use parley_core::models::Message;
use parley_net::protocol::{ClientEvent, ServerEvent};

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Where the conversation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    /// Nothing in flight; the user may speak.
    Idle,
    /// A user message was sent; no response fragment has arrived yet.
    AwaitingResponse,
    /// Agent response fragments are arriving.
    Streaming,
    /// The daily allowance ran out mid-session; the session is over.
    LimitReached,
}

// ── Signals ───────────────────────────────────────────────────────────────────

/// Side effects of applying an event, for the layer above to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatSignal {
    /// Transcript or phase changed; nothing else to do.
    None,
    /// The session hit the daily limit: surface the blocking notice and
    /// leave the conversation view.
    LimitReached,
    /// A backend error to surface; the session stays usable.
    Error(String),
}

// ── ChatSession ───────────────────────────────────────────────────────────────

/// One conversation with the practice agent.
#[derive(Debug, Clone)]
pub struct ChatSession {
    scenario_id: String,
    user_id: String,
    transcript: Vec<Message>,
    phase: ChatPhase,
}

impl ChatSession {
    /// Open a session for `scenario_id`; emit [`ChatSession::start_event`]
    /// before anything else.
    pub fn new(scenario_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            user_id: user_id.into(),
            transcript: Vec::new(),
            phase: ChatPhase::Idle,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Scenario this session was opened for.
    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    /// Current phase.
    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    /// The ordered transcript so far.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// `true` while a response is pending or streaming (the typing
    /// indicator).
    pub fn is_typing(&self) -> bool {
        matches!(self.phase, ChatPhase::AwaitingResponse | ChatPhase::Streaming)
    }

    /// `true` while a response is pending or streaming; the stall deadline
    /// should be armed exactly then.
    pub fn awaits_backend(&self) -> bool {
        self.is_typing()
    }

    // ── Operations ────────────────────────────────────────────────────────

    /// The conversation-opening event to emit on scenario entry.
    pub fn start_event(&self) -> ClientEvent {
        ClientEvent::StartConversation {
            scenario_id: self.scenario_id.clone(),
            user_id: self.user_id.clone(),
        }
    }

    /// Record a user submission and return the event to emit.
    ///
    /// Blank input and submissions after the limit was reached return `None`
    /// and change nothing.
    pub fn submit(&mut self, text: &str) -> Option<ClientEvent> {
        let text = text.trim();
        if text.is_empty() || self.phase == ChatPhase::LimitReached {
            return None;
        }

        self.transcript.push(Message::user(text));
        self.phase = ChatPhase::AwaitingResponse;
        Some(ClientEvent::SendMessage {
            text: text.to_string(),
        })
    }

    /// Apply one inbound event, returning the signal for the layer above.
    ///
    /// Events that belong to the profile store (`profile-data`,
    /// `conversation-completed`) are ignored here.
    pub fn apply(&mut self, event: &ServerEvent) -> ChatSignal {
        match event {
            ServerEvent::AgentMessage { text } => {
                self.seal_open_message();
                self.transcript.push(Message::agent(text.clone()));
                self.phase = ChatPhase::Idle;
                ChatSignal::None
            }

            ServerEvent::AgentMessageChunk { text } => {
                match self.transcript.last_mut() {
                    Some(last) if last.is_open_agent() => last.text.push_str(text),
                    _ => self.transcript.push(Message::agent_streaming(text.clone())),
                }
                self.phase = ChatPhase::Streaming;
                ChatSignal::None
            }

            ServerEvent::AgentMessageEnd => {
                self.seal_open_message();
                self.phase = ChatPhase::Idle;
                ChatSignal::None
            }

            ServerEvent::LimitReached => {
                self.seal_open_message();
                self.phase = ChatPhase::LimitReached;
                ChatSignal::LimitReached
            }

            ServerEvent::Error { message } => {
                self.seal_open_message();
                self.phase = ChatPhase::Idle;
                ChatSignal::Error(message.clone())
            }

            // Profile events are not ours.
            ServerEvent::ProfileData(_) | ServerEvent::ConversationCompleted { .. } => {
                ChatSignal::None
            }
        }
    }

    /// React to a stalled response stream (no inbound chat event before the
    /// deadline): seal anything open and return to idle with an error.
    pub fn on_stall(&mut self) -> ChatSignal {
        self.seal_open_message();
        self.phase = ChatPhase::Idle;
        ChatSignal::Error("The response stalled. Please try again.".to_string())
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Mark the trailing agent message complete, if one is still open.
    fn seal_open_message(&mut self) {
        if let Some(last) = self.transcript.last_mut() {
            if last.is_open_agent() {
                last.complete = true;
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
