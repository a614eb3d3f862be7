//! Orchestration logic and collaborator trait definitions for AskCampus.
//!
//! This crate defines the "ports" (the history store and LLM provider
//! traits) that the infrastructure layer implements. It depends only on
//! `askcampus-types` -- never on `askcampus-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
pub mod storage;
