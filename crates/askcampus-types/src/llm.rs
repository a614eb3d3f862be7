//! LLM request types and errors for AskCampus.
//!
//! The inference collaborator is deliberately narrow: one system instruction
//! plus one user-role text block in, one reply string out. No streaming, no
//! tool calling, no multi-message structured input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request to an LLM provider for a single reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier (e.g., "@cf/meta/llama-3.3-70b-instruct-fp8-fast").
    pub model: String,
    /// Fixed system instruction (persona).
    pub system: String,
    /// The serialized conversation prompt, sent as the sole user content.
    pub input: String,
}

/// Errors from LLM provider backends.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited")]
    RateLimited,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
