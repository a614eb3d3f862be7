//! LLM provider adapters.
//!
//! One provider ships with the relay: Cloudflare Workers AI, matching the
//! original deployment's inference backend.

pub mod workers_ai;

pub use workers_ai::WorkersAiProvider;
