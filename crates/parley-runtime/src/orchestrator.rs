//! Async runtime orchestrator.
//!
//! Owns the realtime [`EventChannel`], the [`ProfileStore`], and the active
//! [`ChatSession`], sending [`RuntimeUpdate`] snapshots through an `mpsc`
//! channel so the TUI event loop can consume them without any shared mutable
//! state, and accepting [`UiCommand`]s on a second channel.
//!
//! Transport policy lives here: connection drops reconnect with doubling
//! backoff (2 s initial, 30 s cap) and an in-flight response stream that
//! stalls past its deadline is abandoned with an error notice.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant};

use parley_core::models::{Message, Profile};
use parley_net::channel::{ChannelEvent, EventChannel};
use parley_net::protocol::{ClientEvent, ServerEvent};

use crate::chat::{ChatSession, ChatSignal};
use crate::profile::ProfileStore;

// ── Policy constants ──────────────────────────────────────────────────────────

/// First reconnect delay after a transport drop.
const RECONNECT_INITIAL: Duration = Duration::from_secs(2);

/// Ceiling for the doubling reconnect delay.
const RECONNECT_MAX: Duration = Duration::from_secs(30);

/// How long an awaited response stream may go silent before it is abandoned.
const STREAM_STALL: Duration = Duration::from_secs(30);

// ── Public types ──────────────────────────────────────────────────────────────

/// Commands the UI sends down to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Open a conversation context for a scenario.
    StartConversation { scenario_id: String },
    /// Forward one user utterance into the active conversation.
    SendMessage { text: String },
    /// The conversation view closed; detach the session. No cancellation
    /// signal exists on the wire, so nothing is sent to the backend.
    LeaveConversation,
}

/// A renderable snapshot of the active conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSnapshot {
    /// Scenario the conversation belongs to.
    pub scenario_id: String,
    /// Ordered transcript so far.
    pub transcript: Vec<Message>,
    /// Whether the typing indicator should show.
    pub typing: bool,
}

/// Updates forwarded to the TUI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeUpdate {
    /// The channel (re)connected.
    Connected,
    /// The channel dropped; a reconnect is underway. Any active conversation
    /// was abandoned.
    ConnectionLost { reason: String },
    /// Fresh profile state for the dashboard.
    Profile(Profile),
    /// Fresh conversation state for the chat view.
    Chat(ChatSnapshot),
    /// The daily allowance ran out mid-session: show the blocking notice and
    /// leave the conversation view.
    LimitReached,
    /// A transient, user-visible notice (backend or transport error).
    Notice(String),
}

// ── RuntimeOrchestrator ───────────────────────────────────────────────────────

/// Background coordinator between the realtime channel and the TUI.
///
/// Call [`RuntimeOrchestrator::start`] to spin the loop up in a dedicated
/// tokio task and receive the update/command channel endpoints.
pub struct RuntimeOrchestrator {
    /// Websocket endpoint of the practice backend.
    server_url: String,
    /// Identity the backend scopes profile and conversations to.
    user_id: String,
    /// Stall deadline for awaited response streams.
    stall_timeout: Duration,
}

/// Why the per-connection loop ended.
enum ConnectedExit {
    /// The transport dropped; reconnect.
    Disconnected,
    /// The UI hung up; shut the runtime down.
    UiGone,
}

impl RuntimeOrchestrator {
    /// Create a new orchestrator for `user_id` against `server_url`.
    pub fn new(server_url: String, user_id: String) -> Self {
        Self {
            server_url,
            user_id,
            stall_timeout: STREAM_STALL,
        }
    }

    /// Override the stream-stall deadline (used by tests).
    pub fn with_stall_timeout(mut self, timeout: Duration) -> Self {
        self.stall_timeout = timeout;
        self
    }

    /// Start the runtime loop.
    ///
    /// Returns:
    /// - An `mpsc::Receiver<RuntimeUpdate>` for the TUI to poll.
    /// - An `mpsc::Sender<UiCommand>` for the TUI to issue commands.
    /// - A [`RuntimeHandle`] that can abort the loop.
    pub fn start(self) -> (
        mpsc::Receiver<RuntimeUpdate>,
        mpsc::Sender<UiCommand>,
        RuntimeHandle,
    ) {
        let (update_tx, update_rx) = mpsc::channel(32);
        let (cmd_tx, cmd_rx) = mpsc::channel(32);

        let handle = tokio::spawn(async move {
            self.run(update_tx, cmd_rx).await;
        });

        (update_rx, cmd_tx, RuntimeHandle { handle })
    }

    // ── Private implementation ────────────────────────────────────────────

    /// Outer connect/reconnect loop.
    async fn run(
        self,
        update_tx: mpsc::Sender<RuntimeUpdate>,
        mut cmd_rx: mpsc::Receiver<UiCommand>,
    ) {
        let mut profiles = ProfileStore::new();
        let mut backoff = RECONNECT_INITIAL;

        loop {
            match EventChannel::connect(&self.server_url).await {
                Ok(channel) => {
                    backoff = RECONNECT_INITIAL;
                    send(&update_tx, RuntimeUpdate::Connected).await;

                    // Refresh the profile on every (re)connect.
                    let _ = channel
                        .emit(ClientEvent::GetProfile {
                            user_id: self.user_id.clone(),
                        })
                        .await;

                    match self
                        .run_connected(channel, &mut profiles, &update_tx, &mut cmd_rx)
                        .await
                    {
                        ConnectedExit::UiGone => {
                            tracing::debug!("ui hung up; runtime loop exiting");
                            return;
                        }
                        ConnectedExit::Disconnected => {}
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "channel connect failed");
                }
            }

            if update_tx.is_closed() {
                return;
            }

            tracing::info!(delay_secs = backoff.as_secs(), "reconnecting");
            time::sleep(backoff).await;
            backoff = (backoff * 2).min(RECONNECT_MAX);
        }
    }

    /// Per-connection loop: route inbound events and UI commands until the
    /// transport drops or the UI goes away.
    async fn run_connected(
        &self,
        mut channel: EventChannel,
        profiles: &mut ProfileStore,
        update_tx: &mpsc::Sender<RuntimeUpdate>,
        cmd_rx: &mut mpsc::Receiver<UiCommand>,
    ) -> ConnectedExit {
        let mut session: Option<ChatSession> = None;
        let mut stall_deadline: Option<Instant> = None;

        loop {
            // A pending-forever arm keeps the select shape uniform when no
            // stream is awaited. Copy the deadline so the future holds no
            // borrow against the handlers below.
            let deadline = stall_deadline;
            let stall_wait = async move {
                match deadline {
                    Some(deadline) => time::sleep_until(deadline).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                inbound = channel.recv() => match inbound {
                    Some(ChannelEvent::Event(event)) => {
                        self.handle_server_event(
                            &event,
                            profiles,
                            &mut session,
                            &mut stall_deadline,
                            update_tx,
                        )
                        .await;
                    }
                    Some(ChannelEvent::DecodeError(reason)) => {
                        send(update_tx, RuntimeUpdate::Notice(
                            format!("Dropped an unreadable server frame: {reason}"),
                        ))
                        .await;
                    }
                    Some(ChannelEvent::Disconnected { reason }) => {
                        // The active session (if any) dies with the connection.
                        send(update_tx, RuntimeUpdate::ConnectionLost { reason }).await;
                        channel.close();
                        return ConnectedExit::Disconnected;
                    }
                    None => {
                        send(update_tx, RuntimeUpdate::ConnectionLost {
                            reason: "channel closed".to_string(),
                        })
                        .await;
                        channel.close();
                        return ConnectedExit::Disconnected;
                    }
                },

                command = cmd_rx.recv() => match command {
                    None => {
                        channel.close();
                        return ConnectedExit::UiGone;
                    }
                    Some(UiCommand::StartConversation { scenario_id }) => {
                        let new_session = ChatSession::new(scenario_id, self.user_id.clone());
                        if channel.emit(new_session.start_event()).await.is_err() {
                            send(update_tx, RuntimeUpdate::ConnectionLost {
                                reason: "channel writer closed".to_string(),
                            })
                            .await;
                            channel.close();
                            return ConnectedExit::Disconnected;
                        }
                        send(update_tx, RuntimeUpdate::Chat(snapshot(&new_session))).await;
                        session = Some(new_session);
                        stall_deadline = None;
                    }
                    Some(UiCommand::SendMessage { text }) => {
                        if let Some(active) = session.as_mut() {
                            if let Some(event) = active.submit(&text) {
                                if channel.emit(event).await.is_err() {
                                    send(update_tx, RuntimeUpdate::ConnectionLost {
                                        reason: "channel writer closed".to_string(),
                                    })
                                    .await;
                                    channel.close();
                                    return ConnectedExit::Disconnected;
                                }
                                stall_deadline = Some(Instant::now() + self.stall_timeout);
                                send(update_tx, RuntimeUpdate::Chat(snapshot(active))).await;
                            }
                        }
                    }
                    Some(UiCommand::LeaveConversation) => {
                        // Detach only; the wire has no cancellation event.
                        session = None;
                        stall_deadline = None;
                    }
                },

                _ = stall_wait => {
                    stall_deadline = None;
                    if let Some(active) = session.as_mut() {
                        tracing::warn!("response stream stalled; abandoning it");
                        let signal = active.on_stall();
                        send(update_tx, RuntimeUpdate::Chat(snapshot(active))).await;
                        if let ChatSignal::Error(message) = signal {
                            send(update_tx, RuntimeUpdate::Notice(message)).await;
                        }
                    }
                }
            }
        }
    }

    /// Apply one decoded server event to the stores and forward updates.
    async fn handle_server_event(
        &self,
        event: &ServerEvent,
        profiles: &mut ProfileStore,
        session: &mut Option<ChatSession>,
        stall_deadline: &mut Option<Instant>,
        update_tx: &mpsc::Sender<RuntimeUpdate>,
    ) {
        if profiles.apply(event) {
            if let Some(profile) = profiles.profile() {
                send(update_tx, RuntimeUpdate::Profile(profile.clone())).await;
            }
        }

        if !is_chat_event(event) {
            return;
        }

        let Some(active) = session.as_mut() else {
            tracing::debug!(?event, "chat event with no active session; dropped");
            return;
        };

        let signal = active.apply(event);

        // Refresh or clear the stall deadline from the resulting phase.
        *stall_deadline = if active.awaits_backend() {
            Some(Instant::now() + self.stall_timeout)
        } else {
            None
        };

        send(update_tx, RuntimeUpdate::Chat(snapshot(active))).await;

        match signal {
            ChatSignal::LimitReached => {
                send(update_tx, RuntimeUpdate::LimitReached).await;
                *session = None;
                *stall_deadline = None;
            }
            ChatSignal::Error(message) => {
                send(update_tx, RuntimeUpdate::Notice(message)).await;
            }
            ChatSignal::None => {}
        }
    }
}

// ── RuntimeHandle ─────────────────────────────────────────────────────────────

/// A handle to the background runtime task.
///
/// Drop or call [`RuntimeHandle::abort`] to stop the loop.
pub struct RuntimeHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl RuntimeHandle {
    /// Immediately abort the runtime loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Events the chat session consumes (everything except profile traffic).
fn is_chat_event(event: &ServerEvent) -> bool {
    !matches!(
        event,
        ServerEvent::ProfileData(_) | ServerEvent::ConversationCompleted { .. }
    )
}

/// Build a renderable snapshot of `session`.
fn snapshot(session: &ChatSession) -> ChatSnapshot {
    ChatSnapshot {
        scenario_id: session.scenario_id().to_string(),
        transcript: session.transcript().to_vec(),
        typing: session.is_typing(),
    }
}

/// Forward an update, ignoring a hung-up receiver.
async fn send(tx: &mpsc::Sender<RuntimeUpdate>, update: RuntimeUpdate) {
    if tx.send(update).await.is_err() {
        tracing::debug!("update receiver dropped");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
