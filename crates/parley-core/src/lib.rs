//! Core domain layer for Parley.
//!
//! Pure types and rules: user profile and chat message models, the static
//! scenario catalog, dashboard gating calculations, carousel view state,
//! display formatting, CLI settings, and the shared error type. Nothing in
//! this crate performs I/O beyond settings persistence.

pub mod carousel;
pub mod catalog;
pub mod error;
pub mod formatting;
pub mod gating;
pub mod models;
pub mod settings;
