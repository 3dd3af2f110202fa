//! Error types for vibe-core

use thiserror::Error;

/// Result type alias for vibe-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared across the analysis pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// The request failed validation (empty symbol, unknown timeframe, ...)
    #[error("Invalid request: {0}")]
    Validation(String),

    /// An upstream source returned an error
    #[error("Source {source_name} failed: {reason}")]
    SourceFailed {
        source_name: String,
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error message
    #[error("{0}")]
    Generic(String),
}

impl Error {
    /// Shorthand for a source failure
    pub fn source_failed(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceFailed {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Generic(format!("JSON error: {err}"))
    }
}
