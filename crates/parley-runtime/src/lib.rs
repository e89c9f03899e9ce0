//! Runtime coordination layer for Parley.
//!
//! Owns the chat session state machine, the session-scoped profile store,
//! and the orchestrator that routes realtime channel traffic between the
//! backend boundary and the UI event loop.

pub mod chat;
pub mod orchestrator;
pub mod profile;

pub use parley_core as core;
pub use parley_net as net;
