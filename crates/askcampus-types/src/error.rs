use thiserror::Error;

use crate::llm::LlmError;

/// Errors from history store operations (used by trait definitions in
/// askcampus-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from the chat orchestrator.
///
/// `MissingFields` maps to HTTP 400 with a fixed message; everything else
/// maps to HTTP 500 with a generic message (detail is logged, never leaked).
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("missing required fields: sessionId and message")]
    MissingFields,

    #[error("malformed stored history: {0}")]
    MalformedHistory(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("inference error: {0}")]
    Inference(#[from] LlmError),
}

impl ChatError {
    /// Whether this error is the caller's fault (HTTP 400) rather than an
    /// internal failure (HTTP 500).
    pub fn is_bad_request(&self) -> bool {
        matches!(self, ChatError::MissingFields)
    }
}
