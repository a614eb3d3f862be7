//! Infrastructure layer for AskCampus.
//!
//! Contains implementations of the collaborator traits defined in
//! `askcampus-core`: SQLite-backed history storage and the Cloudflare
//! Workers AI provider, plus the config loader.

pub mod config;
pub mod llm;
pub mod sqlite;
