//! Storage backends for the JSON document table and the flag collection.

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::document::StoredDocument;
use crate::flag::Flag;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("revision mismatch for {key}: expected {expected}")]
    RevisionMismatch { key: String, expected: String },
    #[error("{key} already exists")]
    AlreadyExists { key: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract behind the storage endpoint.
///
/// Writes replace whole documents. Without an expected revision the last
/// writer wins; with one, a stale writer gets `RevisionMismatch`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace `key`. Returns the new revision.
    async fn put(&self, key: &str, data: Value, if_revision: Option<&str>) -> StoreResult<String>;

    /// Create `key` only if it is absent; `AlreadyExists` otherwise.
    async fn insert(&self, key: &str, data: Value) -> StoreResult<String>;

    async fn get(&self, key: &str) -> StoreResult<Option<StoredDocument>>;

    /// All `item_` documents, most recently created first.
    async fn list_items(&self) -> StoreResult<Vec<StoredDocument>>;

    /// Idempotent. Returns whether a row was removed.
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    async fn add_flag(&self, flag: &Flag) -> StoreResult<()>;

    /// Flags in insertion order, orphans included.
    async fn list_flags(&self) -> StoreResult<Vec<Flag>>;

    /// Remove every flag on `item_id`. Returns how many were removed.
    async fn remove_flags(&self, item_id: &str) -> StoreResult<u64>;

    /// Backend liveness check.
    async fn ping(&self) -> StoreResult<()>;
}

pub(crate) fn new_revision() -> String {
    Uuid::new_v4().to_string()
}
