//! LlmProvider trait definition.
//!
//! The inference collaborator is treated as an opaque function: given a
//! fixed system instruction and a single user-role prompt, it either
//! returns a reply string or fails. No streaming, no tool calling.

use askcampus_types::llm::{GenerationRequest, LlmError};

/// Trait for LLM provider backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in askcampus-infra (e.g., `WorkersAiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "workers-ai").
    fn name(&self) -> &str;

    /// Send a generation request and receive the full reply text.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
