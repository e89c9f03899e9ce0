//! Backend boundary layer for Parley.
//!
//! Responsible for the realtime websocket channel, the closed tagged-union
//! wire protocol validated at the boundary, and the magic-link identity
//! client with its persisted sign-in session.

pub mod auth;
pub mod channel;
pub mod protocol;

pub use parley_core as core;
