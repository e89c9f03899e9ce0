//! Realtime event channel to the practice backend.
//!
//! [`EventChannel::connect`] establishes one websocket connection and splits
//! it into two pump tasks: outbound [`ClientEvent`]s are drained from an
//! `mpsc` queue and written as JSON text frames; inbound text frames are
//! decoded at the boundary and forwarded as [`ChannelEvent`]s. The consumer
//! (the runtime orchestrator) observes transport state through the same
//! stream, so connection loss is an event, not a panic.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use parley_core::error::{ParleyError, Result};

use crate::protocol::{decode_server_event, encode_client_event, ClientEvent, ServerEvent};

/// Queue depth for both pump directions.
const CHANNEL_BUFFER: usize = 64;

// ── ChannelEvent ──────────────────────────────────────────────────────────────

/// What the channel delivers to its consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// A decoded backend event.
    Event(ServerEvent),
    /// An inbound frame that failed boundary validation (logged, surfaced,
    /// never fatal).
    DecodeError(String),
    /// The websocket closed or errored; the channel is dead after this.
    Disconnected { reason: String },
}

// ── EventChannel ──────────────────────────────────────────────────────────────

/// One live websocket connection with split read/write pumps.
#[derive(Debug)]
pub struct EventChannel {
    outbound_tx: mpsc::Sender<ClientEvent>,
    inbound_rx: mpsc::Receiver<ChannelEvent>,
    read_task: tokio::task::JoinHandle<()>,
    write_task: tokio::task::JoinHandle<()>,
}

impl EventChannel {
    /// Open a websocket to `url` and start both pump tasks.
    pub async fn connect(url: &str) -> Result<Self> {
        let (ws_stream, _) = connect_async(url)
            .await
            .map_err(|e| ParleyError::Transport(format!("connect to {url}: {e}")))?;
        tracing::info!(url, "realtime channel connected");

        let (mut ws_tx, mut ws_rx) = ws_stream.split();

        let (outbound_tx, mut outbound_rx) = mpsc::channel::<ClientEvent>(CHANNEL_BUFFER);
        let (inbound_tx, inbound_rx) = mpsc::channel::<ChannelEvent>(CHANNEL_BUFFER);

        // Write pump: ClientEvent → JSON text frame.
        let write_task = tokio::spawn(async move {
            while let Some(event) = outbound_rx.recv().await {
                let frame = match encode_client_event(&event) {
                    Ok(f) => f,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to encode outbound event");
                        continue;
                    }
                };
                if let Err(e) = ws_tx.send(Message::Text(frame.into())).await {
                    tracing::debug!(error = %e, "websocket send failed; writer stopping");
                    break;
                }
            }
        });

        // Read pump: text frame → decoded ChannelEvent.
        let read_task = tokio::spawn(async move {
            loop {
                let frame = match ws_rx.next().await {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => {
                        let _ = inbound_tx
                            .send(ChannelEvent::Disconnected {
                                reason: "connection closed".to_string(),
                            })
                            .await;
                        break;
                    }
                    Some(Ok(_)) => continue, // ping/pong/binary: nothing to do
                    Some(Err(e)) => {
                        let _ = inbound_tx
                            .send(ChannelEvent::Disconnected {
                                reason: e.to_string(),
                            })
                            .await;
                        break;
                    }
                };

                let event = match decode_server_event(&frame) {
                    Ok(ev) => ChannelEvent::Event(ev),
                    Err(e) => {
                        tracing::warn!(error = %e, "rejected inbound frame");
                        ChannelEvent::DecodeError(e.to_string())
                    }
                };

                if inbound_tx.send(event).await.is_err() {
                    tracing::debug!("channel consumer dropped; reader stopping");
                    break;
                }
            }
        });

        Ok(Self {
            outbound_tx,
            inbound_rx,
            read_task,
            write_task,
        })
    }

    /// Queue an outbound event for the write pump.
    ///
    /// Fails with a transport error when the writer has already stopped.
    pub async fn emit(&self, event: ClientEvent) -> Result<()> {
        self.outbound_tx
            .send(event)
            .await
            .map_err(|_| ParleyError::Transport("channel writer closed".to_string()))
    }

    /// A cloneable handle for queueing outbound events.
    pub fn sender(&self) -> mpsc::Sender<ClientEvent> {
        self.outbound_tx.clone()
    }

    /// Receive the next inbound event; `None` after both pumps have stopped.
    pub async fn recv(&mut self) -> Option<ChannelEvent> {
        self.inbound_rx.recv().await
    }

    /// Tear the connection down by aborting both pump tasks.
    pub fn close(self) {
        self.read_task.abort();
        self.write_task.abort();
        tracing::debug!("realtime channel closed");
    }
}
