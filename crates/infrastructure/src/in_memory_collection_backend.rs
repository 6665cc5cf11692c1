use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use freightline_application::{CollectionBackend, PushBatch};
use freightline_core::{AppError, AppResult};
use freightline_domain::{BoardRecord, Principal};
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

/// In-memory board collection backend.
///
/// Rows are held newest first; every accepted mutation broadcasts a
/// full-collection snapshot to all live `observe` subscribers, matching the
/// push semantics of the hosted collection service. `set_offline` makes
/// every operation fail with a transport error, for exercising the boards'
/// degraded paths.
pub struct InMemoryCollectionBackend<D: BoardRecord> {
    rows: RwLock<Vec<D>>,
    subscribers: RwLock<Vec<mpsc::Sender<PushBatch<D>>>>,
    offline: AtomicBool,
}

impl<D: BoardRecord> InMemoryCollectionBackend<D> {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            subscribers: RwLock::new(Vec::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Replaces the stored rows without notifying subscribers.
    pub async fn seed(&self, rows: Vec<D>) {
        *self.rows.write().await = rows;
    }

    /// Switches the simulated transport on or off.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Transport("collection backend offline".to_owned()));
        }
        Ok(())
    }

    async fn broadcast(&self) {
        let snapshot = self.rows.read().await.clone();
        let mut subscribers = self.subscribers.write().await;
        subscribers.retain(|sender| sender.try_send(snapshot.clone()).is_ok());
    }
}

impl<D: BoardRecord> Default for InMemoryCollectionBackend<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<D: BoardRecord> CollectionBackend<D> for InMemoryCollectionBackend<D> {
    async fn list(&self, limit: usize) -> AppResult<Vec<D>> {
        self.ensure_online()?;
        Ok(self.rows.read().await.iter().take(limit).cloned().collect())
    }

    async fn create(&self, actor: &Principal, draft: D::Draft) -> AppResult<D> {
        self.ensure_online()?;

        let row = D::from_draft(&draft, Uuid::new_v4().to_string(), Utc::now(), actor);
        self.rows.write().await.insert(0, row.clone());
        self.broadcast().await;
        Ok(row)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.ensure_online()?;

        let removed = {
            let mut rows = self.rows.write().await;
            let before = rows.len();
            rows.retain(|row| row.id() != id);
            rows.len() != before
        };

        if !removed {
            return Err(AppError::NotFound(format!("row '{id}' does not exist")));
        }

        self.broadcast().await;
        Ok(())
    }

    async fn observe(&self) -> AppResult<mpsc::Receiver<PushBatch<D>>> {
        self.ensure_online()?;

        let (sender, receiver) = mpsc::channel(16);
        let snapshot = self.rows.read().await.clone();
        let _ = sender.try_send(snapshot);
        self.subscribers.write().await.push(sender);
        Ok(receiver)
    }
}
