//! Error types for meetnote.

use thiserror::Error;

/// Result type alias using meetnote's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for meetnote operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Referenced meeting does not exist
    #[error("Meeting with ID {0} not found")]
    MeetingNotFound(i32),

    /// Neither the request nor the stored record carries any text to enhance
    #[error("No content available to enhance. Please provide transcribed_text or user_notes.")]
    EmptyContent,

    /// Unrecognized enhancement mode
    #[error("Unsupported enhancement type: {0}")]
    UnsupportedMode(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
