//! Error types for serenity.

use thiserror::Error;

/// Errors that can occur while running serenity.
#[derive(Error, Debug)]
pub enum SerenityError {
    /// Configuration could not be loaded, saved or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The local database failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A persisted log could not be written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or terminal I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The HTTP transport to the language model failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The language model service returned an error or an unusable response.
    #[error("Companion service error: {0}")]
    Companion(String),

    /// User input was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
