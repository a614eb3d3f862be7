//! History store trait.
//!
//! Defines the interface for session-keyed conversation persistence.
//! Implementations live in askcampus-infra.

use askcampus_types::error::StoreError;

/// Trait for the opaque key-value store holding conversation history.
///
/// Values are opaque JSON documents keyed by session identifier; the store
/// neither inspects nor validates them. The orchestrator owns the persisted
/// layout (a JSON array of turn objects) and parses on read.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in askcampus-infra.
pub trait HistoryStore: Send + Sync {
    /// Get the stored value for a session. Returns None if the key does
    /// not exist -- an absent key denotes an empty conversation, not an error.
    fn get(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, StoreError>> + Send;

    /// Write the value for a session (upsert), overwriting any prior value.
    ///
    /// There is no compare-and-swap: concurrent writers for the same session
    /// race read-modify-write and the last write wins.
    fn put(
        &self,
        session_id: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
