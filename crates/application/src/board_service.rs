//! Per-board list reconciliation.
//!
//! Each board (loads, trucks) owns one [`BoardCache`] merging four sources
//! into a single de-duplicated row sequence: an initial bulk fetch, a
//! recurring poll, a full-snapshot push channel, and optimistic local
//! insertions from in-flight creates. A short suppression window keeps a
//! just-self-submitted row from flickering when its echo arrives back on
//! the push channel.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use freightline_core::AppResult;
use freightline_domain::{BoardRecord, Principal};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::board_ports::{Clock, CollectionBackend, PushBatch, WarmStartCache};

/// Per-board cache tuning.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Warm-start cache key for the collection.
    pub collection_key: &'static str,
    /// Bounded page size for bulk fetches.
    pub page_size: usize,
    /// Interval between background refreshes.
    pub poll_interval: Duration,
    /// Window inside which a push echo for a known row is discarded.
    pub suppression_window: TimeDelta,
    /// Whether a failed create falls back to an unpersisted local row.
    ///
    /// Only the loads board carries this fallback; trucks never did. The
    /// asymmetry is authored product behaviour, kept deliberately.
    pub offline_create_fallback: bool,
}

impl BoardConfig {
    /// Configuration for the loads board.
    #[must_use]
    pub fn loads() -> Self {
        Self {
            collection_key: "loads",
            page_size: 100,
            poll_interval: Duration::from_secs(60),
            suppression_window: TimeDelta::seconds(5),
            offline_create_fallback: true,
        }
    }

    /// Configuration for the trucks board.
    #[must_use]
    pub fn trucks() -> Self {
        Self {
            collection_key: "trucks",
            page_size: 100,
            poll_interval: Duration::from_secs(60),
            suppression_window: TimeDelta::seconds(5),
            offline_create_fallback: false,
        }
    }
}

/// Result of a create attempt.
#[derive(Debug, Clone)]
pub enum CreateOutcome<D> {
    /// The backend accepted the row.
    Persisted(D),
    /// The backend call failed; an unpersisted local row was inserted
    /// instead (loads board only).
    LocalOnly {
        /// The placeholder row now held by the cache.
        item: D,
        /// The backend error that triggered the fallback.
        error: String,
    },
}

impl<D> CreateOutcome<D> {
    /// Returns the row held by the cache after the attempt.
    pub fn item(&self) -> &D {
        match self {
            Self::Persisted(item) | Self::LocalOnly { item, .. } => item,
        }
    }
}

struct BoardState<D> {
    items: Vec<D>,
    last_seen_at: HashMap<String, DateTime<Utc>>,
    pending_optimistic: HashSet<String>,
    last_error: Option<String>,
}

impl<D> Default for BoardState<D> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            last_seen_at: HashMap::new(),
            pending_optimistic: HashSet::new(),
            last_error: None,
        }
    }
}

/// Reconciled local view of one remote board collection.
///
/// Rows are unique by id. Public operations never panic and never leak
/// backend failures as crashes: fetch errors land in [`Self::last_error`],
/// create/delete errors return to the caller.
pub struct BoardCache<D: BoardRecord> {
    backend: Arc<dyn CollectionBackend<D>>,
    warm_start_cache: Arc<dyn WarmStartCache>,
    clock: Arc<dyn Clock>,
    config: BoardConfig,
    principal: Principal,
    state: RwLock<BoardState<D>>,
    last_created: Arc<RwLock<Option<D>>>,
}

impl<D: BoardRecord> BoardCache<D> {
    /// Creates a cache for one board, bound to the resolved principal.
    #[must_use]
    pub fn new(
        backend: Arc<dyn CollectionBackend<D>>,
        warm_start_cache: Arc<dyn WarmStartCache>,
        clock: Arc<dyn Clock>,
        config: BoardConfig,
        principal: Principal,
    ) -> Self {
        Self {
            backend,
            warm_start_cache,
            clock,
            config,
            principal,
            state: RwLock::new(BoardState::default()),
            last_created: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the current row sequence.
    pub async fn items(&self) -> Vec<D> {
        self.state.read().await.items.clone()
    }

    /// Returns the last fetch error, if the most recent fetch failed.
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// Returns the last row created in this session, if any.
    pub async fn last_created(&self) -> Option<D> {
        self.last_created.read().await.clone()
    }

    /// Returns the shared session-scoped last-created slot.
    ///
    /// A dependent view (the per-user board) clones this to show a
    /// just-created row it owns before its own next refresh.
    #[must_use]
    pub fn last_created_slot(&self) -> Arc<RwLock<Option<D>>> {
        Arc::clone(&self.last_created)
    }

    /// Paints the board from the warm-start cache before the first fetch.
    ///
    /// Best effort: a missing, unreadable, or stale payload is skipped and
    /// superseded by the next fetch either way.
    pub async fn warm_start(&self) {
        let cached = match self.warm_start_cache.load(self.config.collection_key).await {
            Ok(cached) => cached,
            Err(error) => {
                debug!(collection = self.config.collection_key, error = %error, "warm-start load failed");
                return;
            }
        };

        let Some(payload) = cached else {
            return;
        };

        match serde_json::from_str::<Vec<D>>(payload.as_str()) {
            Ok(rows) => {
                let mut state = self.state.write().await;
                if state.items.is_empty() {
                    state.items = dedup_by_id(rows);
                }
            }
            Err(error) => {
                debug!(collection = self.config.collection_key, error = %error, "warm-start payload unreadable");
            }
        }
    }

    /// Performs the initial bulk fetch, replacing the whole row sequence.
    ///
    /// On failure the error is surfaced via [`Self::last_error`] and any
    /// previously loaded rows are preserved.
    pub async fn initialize(&self) -> AppResult<()> {
        match self.backend.list(self.config.page_size).await {
            Ok(rows) => {
                let rows = dedup_by_id(rows);
                {
                    let mut state = self.state.write().await;
                    state
                        .pending_optimistic
                        .retain(|id| !rows.iter().any(|row| row.id() == id));
                    state.items = rows;
                    state.last_error = None;
                }
                self.store_warm_start().await;
                Ok(())
            }
            Err(error) => {
                self.state.write().await.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Re-runs the bulk fetch and replaces the row sequence, keeping any
    /// pending optimistic row the server response does not reflect yet
    /// (matched by id; prepended when absent).
    pub async fn refresh(&self) -> AppResult<()> {
        match self.backend.list(self.config.page_size).await {
            Ok(rows) => {
                let mut rows = dedup_by_id(rows);
                {
                    let mut state = self.state.write().await;

                    let mut still_pending = HashSet::new();
                    for id in state.pending_optimistic.iter() {
                        if rows.iter().any(|row| row.id() == id.as_str()) {
                            continue;
                        }
                        if let Some(local) =
                            state.items.iter().find(|item| item.id() == id.as_str())
                        {
                            rows.insert(0, local.clone());
                            still_pending.insert(id.clone());
                        }
                    }

                    state.pending_optimistic = still_pending;
                    state.items = rows;
                    state.last_error = None;
                }
                self.store_warm_start().await;
                Ok(())
            }
            Err(error) => {
                // Retried only by the next scheduled poll.
                self.state.write().await.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Applies one full-snapshot push batch.
    ///
    /// An incoming row whose id was seen within the suppression window is
    /// discarded in favour of the local copy (stale-push guard for
    /// self-caused echoes). Local rows missing from the snapshot (pending
    /// optimistic inserts racing the push) are retained at the head.
    pub async fn apply_push(&self, batch: PushBatch<D>) {
        let now = self.clock.now();
        let batch = dedup_by_id(batch);
        let mut state = self.state.write().await;

        let mut next: Vec<D> = Vec::with_capacity(batch.len());
        for incoming in batch {
            let id = incoming.id().to_owned();
            let suppressed = state
                .last_seen_at
                .get(id.as_str())
                .is_some_and(|seen| {
                    now.signed_duration_since(*seen) < self.config.suppression_window
                });

            if suppressed
                && let Some(local) = state.items.iter().find(|item| item.id() == id.as_str())
            {
                next.push(local.clone());
                continue;
            }

            state.last_seen_at.insert(id, now);
            next.push(incoming);
        }

        let retained: Vec<D> = state
            .items
            .iter()
            .filter(|item| !next.iter().any(|row| row.id() == item.id()))
            .cloned()
            .collect();
        for local in retained.into_iter().rev() {
            next.insert(0, local);
        }

        state.items = next;
    }

    /// Validates the draft and creates a row through the backend.
    ///
    /// On success the returned row is inserted at the head, stamped into
    /// the suppression map, and recorded as the session's last-created row.
    /// On backend failure the loads board inserts an unpersisted local
    /// placeholder instead; other boards surface the error unchanged.
    pub async fn create(&self, draft: D::Draft) -> AppResult<CreateOutcome<D>> {
        D::validate_draft(&draft)?;

        match self.backend.create(&self.principal, draft.clone()).await {
            Ok(item) => {
                self.insert_optimistic(item.clone()).await;
                *self.last_created.write().await = Some(item.clone());
                Ok(CreateOutcome::Persisted(item))
            }
            Err(error) => {
                if !self.config.offline_create_fallback {
                    return Err(error);
                }

                warn!(
                    collection = self.config.collection_key,
                    error = %error,
                    "create failed, inserting unpersisted local row"
                );
                let placeholder = D::from_draft(
                    &draft,
                    format!("local-{}", Uuid::new_v4()),
                    self.clock.now(),
                    &self.principal,
                );
                self.insert_optimistic(placeholder.clone()).await;
                Ok(CreateOutcome::LocalOnly {
                    item: placeholder,
                    error: error.to_string(),
                })
            }
        }
    }

    /// Deletes a row.
    ///
    /// Removal from the local sequence is unconditional and never rolled
    /// back; a backend failure is only surfaced to the caller.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        {
            let mut state = self.state.write().await;
            state.items.retain(|item| item.id() != id);
            state.pending_optimistic.remove(id);
            state.last_seen_at.remove(id);
        }

        self.backend.delete(id).await
    }

    /// Filters the in-memory sequence by case-insensitive substring match
    /// across the board's text fields. An empty query returns everything.
    /// Never re-queries the backend.
    pub async fn filter(&self, query: &str) -> Vec<D> {
        let needle = query.trim().to_lowercase();
        let state = self.state.read().await;

        if needle.is_empty() {
            return state.items.clone();
        }

        state
            .items
            .iter()
            .filter(|item| {
                item.search_haystack()
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle.as_str()))
            })
            .cloned()
            .collect()
    }

    /// Returns the rows owned by the bound principal.
    pub async fn mine(&self) -> Vec<D> {
        self.state
            .read()
            .await
            .items
            .iter()
            .filter(|item| {
                item.owner_markers()
                    .iter()
                    .any(|marker| self.principal.matches_owner_marker(marker))
            })
            .cloned()
            .collect()
    }

    async fn insert_optimistic(&self, item: D) {
        let now = self.clock.now();
        let mut state = self.state.write().await;
        let id = item.id().to_owned();
        state.items.retain(|existing| existing.id() != id.as_str());
        state.items.insert(0, item);
        state.last_seen_at.insert(id.clone(), now);
        state.pending_optimistic.insert(id);
    }

    async fn store_warm_start(&self) {
        let payload = {
            let state = self.state.read().await;
            serde_json::to_string(&state.items)
        };

        match payload {
            Ok(payload) => {
                if let Err(error) = self
                    .warm_start_cache
                    .store(self.config.collection_key, payload)
                    .await
                {
                    debug!(collection = self.config.collection_key, error = %error, "warm-start store failed");
                }
            }
            Err(error) => {
                debug!(collection = self.config.collection_key, error = %error, "warm-start serialization failed");
            }
        }
    }
}

/// Background task guard; the task is aborted when the guard drops.
pub struct BoardTask {
    handle: JoinHandle<()>,
}

impl Drop for BoardTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl<D: BoardRecord> BoardCache<D> {
    /// Spawns the recurring background refresh.
    ///
    /// The task holds only a weak reference; once the cache is dropped the
    /// next tick exits, so a torn-down board can never be written to.
    #[must_use]
    pub fn spawn_poller(self: &Arc<Self>) -> BoardTask {
        let cache = Arc::downgrade(self);
        let interval = self.config.poll_interval;

        BoardTask {
            handle: tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                // The first tick completes immediately; initialize() covers
                // the initial fetch.
                ticker.tick().await;

                loop {
                    ticker.tick().await;
                    let Some(cache) = cache.upgrade() else {
                        break;
                    };
                    if let Err(error) = cache.refresh().await {
                        warn!(
                            collection = cache.config.collection_key,
                            error = %error,
                            "background refresh failed, waiting for next poll"
                        );
                    }
                }
            }),
        }
    }

    /// Opens the push channel and spawns the task applying its batches.
    pub async fn spawn_subscription(self: &Arc<Self>) -> AppResult<BoardTask> {
        let mut receiver = self.backend.observe().await?;
        let cache = Arc::downgrade(self);

        Ok(BoardTask {
            handle: tokio::spawn(async move {
                while let Some(batch) = receiver.recv().await {
                    let Some(cache) = cache.upgrade() else {
                        break;
                    };
                    cache.apply_push(batch).await;
                }
            }),
        })
    }
}

fn dedup_by_id<D: BoardRecord>(rows: Vec<D>) -> Vec<D> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.id().to_owned()))
        .collect()
}

#[cfg(test)]
mod tests;
