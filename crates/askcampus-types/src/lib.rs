//! Shared domain types for AskCampus.
//!
//! This crate contains the core domain types used across the AskCampus
//! relay: conversation turns, LLM request shapes, configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod turn;
