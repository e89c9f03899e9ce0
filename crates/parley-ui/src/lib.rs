//! Terminal UI layer for Parley.
//!
//! Provides themes, the header/progress-bar/scenario-card components, the
//! sign-in, dashboard, and conversation views, and the main application
//! event loop built on top of [`ratatui`].

pub mod app;
pub mod chat_view;
pub mod components;
pub mod dashboard_view;
pub mod signin_view;
pub mod themes;

pub use parley_core as core;
