//! Collaborator error types

use thiserror::Error;

/// Failures talking to an embedding or completion service.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Embedding dimension mismatch at index {index}: expected {expected}, got {actual}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for collaborator calls.
pub type LlmResult<T> = Result<T, LlmError>;
