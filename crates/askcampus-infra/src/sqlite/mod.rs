//! SQLite persistence for AskCampus.
//!
//! Implements the `HistoryStore` trait from askcampus-core with sqlx,
//! using split reader/writer pools in WAL mode.

pub mod history;
pub mod pool;
