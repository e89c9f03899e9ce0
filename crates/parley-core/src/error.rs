use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the Parley client.
#[derive(Error, Debug)]
pub enum ParleyError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// An inbound frame did not match any recognised event shape.
    #[error("Unrecognised event frame: {0}")]
    FrameDecode(String),

    /// The realtime channel failed to connect or dropped mid-use.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The identity service rejected a sign-in operation.
    #[error("Sign-in failed: {0}")]
    Auth(String),

    /// A scenario identifier is not present in the catalog.
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    /// A difficulty name string is not one of the recognised levels.
    #[error("Invalid difficulty: {0}")]
    InvalidDifficulty(String),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the parley crates.
pub type Result<T> = std::result::Result<T, ParleyError>;
