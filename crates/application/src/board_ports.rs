//! Ports consumed by the board reconciliation cache.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use freightline_core::AppResult;
use freightline_domain::{BoardRecord, Principal};
use tokio::sync::mpsc;

/// One push delivery: a full snapshot of the collection, not a delta.
pub type PushBatch<D> = Vec<D>;

/// Port over a remote board collection (loads, trucks).
#[async_trait]
pub trait CollectionBackend<D: BoardRecord>: Send + Sync {
    /// Bulk-fetches up to `limit` rows, newest first.
    async fn list(&self, limit: usize) -> AppResult<Vec<D>>;

    /// Creates a row on behalf of the acting principal.
    async fn create(&self, actor: &Principal, draft: D::Draft) -> AppResult<D>;

    /// Deletes a row by id.
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Opens a push channel delivering full-snapshot batches.
    async fn observe(&self) -> AppResult<mpsc::Receiver<PushBatch<D>>>;
}

/// Session-scoped store painting a non-empty board before the first fetch.
///
/// Holds the last-known JSON row sequence per collection key; always
/// superseded by the next fetch.
#[async_trait]
pub trait WarmStartCache: Send + Sync {
    /// Loads the cached payload for a collection, if any.
    async fn load(&self, collection_key: &str) -> AppResult<Option<String>>;

    /// Stores the latest payload for a collection.
    async fn store(&self, collection_key: &str, payload: String) -> AppResult<()>;
}

/// Wall-clock source used for freshness windows.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}
