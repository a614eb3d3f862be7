//! SQLite history store implementation.
//!
//! Implements `HistoryStore` from `askcampus-core` using sqlx with split
//! read/write pools. Values are stored as JSON text and deserialized on
//! read; a value that is not valid JSON surfaces as a query error, never
//! silently dropped.

use askcampus_core::storage::history_store::HistoryStore;
use askcampus_types::error::StoreError;
use chrono::Utc;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `HistoryStore`.
pub struct SqliteHistoryStore {
    pool: DatabasePool,
}

impl SqliteHistoryStore {
    /// Create a new history store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl HistoryStore for SqliteHistoryStore {
    async fn get(&self, session_id: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let row = sqlx::query("SELECT value FROM chat_history WHERE session_id = ?")
            .bind(session_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let value_str: String = row
                    .try_get("value")
                    .map_err(|e| StoreError::Query(e.to_string()))?;
                let value: serde_json::Value = serde_json::from_str(&value_str)
                    .map_err(|e| StoreError::Query(format!("invalid JSON value: {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, session_id: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        let value_str = serde_json::to_string(value)
            .map_err(|e| StoreError::Query(format!("failed to serialize value: {e}")))?;

        sqlx::query(
            r#"INSERT INTO chat_history (session_id, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (session_id) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(session_id)
        .bind(&value_str)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }
}
