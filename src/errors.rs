//! Error types for DeskBuddy
//!
//! One crate-wide error enum; workflow steps propagate with `?` and the
//! interaction loop decides what the user sees.

use thiserror::Error;

/// Main error type for the assistant
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Record storage cannot be reached
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),

    /// Insert collided with an existing record number
    #[error("record number already exists: {0}")]
    DuplicateKey(String),

    /// Insert attempted against a read-only store
    #[error("store is read-only")]
    ReadOnlyStore,

    /// Summarization capability cannot be reached
    #[error("summarizer unavailable: {0}")]
    SummarizationUnavailable(String),

    /// Support notification could not be delivered
    #[error("notification failed: {0}")]
    NotificationFailure(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// User interrupted an interactive prompt
    #[error("interrupted")]
    Interrupted,

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

impl From<anyhow::Error> for AssistantError {
    fn from(err: anyhow::Error) -> Self {
        AssistantError::Generic(err.to_string())
    }
}
