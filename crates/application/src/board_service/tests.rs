use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use freightline_core::{AppError, AppResult};
use freightline_domain::{
    Load, LoadDraft, LoadStatus, Principal, Role, TrailerType, Truck, TruckDraft,
};
use tokio::sync::{Mutex, RwLock, mpsc};

use crate::board_ports::{Clock, CollectionBackend, PushBatch, WarmStartCache};

use super::{BoardCache, BoardConfig, CreateOutcome};

struct ManualClock {
    epoch_seconds: AtomicI64,
}

impl ManualClock {
    fn at(epoch_seconds: i64) -> Self {
        Self {
            epoch_seconds: AtomicI64::new(epoch_seconds),
        }
    }

    fn advance(&self, seconds: i64) {
        self.epoch_seconds.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.epoch_seconds.load(Ordering::SeqCst), 0).unwrap_or_default()
    }
}

#[derive(Default)]
struct MemoryWarmStart {
    payloads: RwLock<std::collections::HashMap<String, String>>,
}

#[async_trait]
impl WarmStartCache for MemoryWarmStart {
    async fn load(&self, collection_key: &str) -> AppResult<Option<String>> {
        Ok(self.payloads.read().await.get(collection_key).cloned())
    }

    async fn store(&self, collection_key: &str, payload: String) -> AppResult<()> {
        self.payloads
            .write()
            .await
            .insert(collection_key.to_owned(), payload);
        Ok(())
    }
}

#[derive(Default)]
struct FakeLoadBackend {
    rows: Mutex<Vec<Load>>,
    fail_list: AtomicBool,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
    next_id: AtomicUsize,
    push_senders: Mutex<Vec<mpsc::Sender<PushBatch<Load>>>>,
}

impl FakeLoadBackend {
    async fn seed(&self, rows: Vec<Load>) {
        *self.rows.lock().await = rows;
    }

    async fn push(&self, batch: PushBatch<Load>) {
        for sender in self.push_senders.lock().await.iter() {
            let _ = sender.send(batch.clone()).await;
        }
    }
}

#[async_trait]
impl CollectionBackend<Load> for FakeLoadBackend {
    async fn list(&self, limit: usize) -> AppResult<Vec<Load>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(AppError::Transport("list unavailable".to_owned()));
        }
        Ok(self.rows.lock().await.iter().take(limit).cloned().collect())
    }

    async fn create(&self, actor: &Principal, draft: LoadDraft) -> AppResult<Load> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(AppError::Transport("create unavailable".to_owned()));
        }

        let id = format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let row = Load {
            id,
            load_number: draft.load_number,
            origin: draft.origin,
            destination: draft.destination,
            pickup_date: draft.pickup_date,
            delivery_date: draft.delivery_date,
            rate: draft.rate,
            trailer_type: draft.trailer_type,
            status: LoadStatus::Available,
            equipment_requirement: draft.equipment_requirement,
            comment: draft.comment,
            posted_by: actor.identity_id().to_owned(),
            created_by: None,
            created_at: Utc::now(),
        };
        self.rows.lock().await.insert(0, row.clone());
        Ok(row)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AppError::Transport("delete unavailable".to_owned()));
        }
        self.rows.lock().await.retain(|row| row.id != id);
        Ok(())
    }

    async fn observe(&self) -> AppResult<mpsc::Receiver<PushBatch<Load>>> {
        let (sender, receiver) = mpsc::channel(8);
        self.push_senders.lock().await.push(sender);
        Ok(receiver)
    }
}

#[derive(Default)]
struct FakeTruckBackend;

#[async_trait]
impl CollectionBackend<Truck> for FakeTruckBackend {
    async fn list(&self, _limit: usize) -> AppResult<Vec<Truck>> {
        Ok(Vec::new())
    }

    async fn create(&self, _actor: &Principal, _draft: TruckDraft) -> AppResult<Truck> {
        Err(AppError::Transport("create unavailable".to_owned()))
    }

    async fn delete(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }

    async fn observe(&self) -> AppResult<mpsc::Receiver<PushBatch<Truck>>> {
        let (_sender, receiver) = mpsc::channel(1);
        Ok(receiver)
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn principal() -> Principal {
    Principal::new(
        "user-1",
        "broker@firm.example.com",
        None,
        None,
        Role::Broker,
        None,
    )
}

fn load_row(id: &str, load_number: &str, posted_by: &str, created_by: Option<&str>) -> Load {
    Load {
        id: id.to_owned(),
        load_number: load_number.to_owned(),
        origin: "Chicago, IL".to_owned(),
        destination: "Dallas, TX".to_owned(),
        pickup_date: date(2026, 9, 1),
        delivery_date: date(2026, 9, 3),
        rate: 2450.0,
        trailer_type: TrailerType::Van,
        status: LoadStatus::Available,
        equipment_requirement: None,
        comment: None,
        posted_by: posted_by.to_owned(),
        created_by: created_by.map(str::to_owned),
        created_at: Utc::now(),
    }
}

fn load_draft(load_number: &str) -> LoadDraft {
    LoadDraft {
        load_number: load_number.to_owned(),
        origin: "Chicago, IL".to_owned(),
        destination: "Dallas, TX".to_owned(),
        pickup_date: date(2026, 9, 1),
        delivery_date: date(2026, 9, 3),
        rate: 2450.0,
        trailer_type: TrailerType::Van,
        equipment_requirement: None,
        comment: None,
    }
}

struct Harness {
    backend: Arc<FakeLoadBackend>,
    clock: Arc<ManualClock>,
    cache: Arc<BoardCache<Load>>,
}

fn harness() -> Harness {
    let backend = Arc::new(FakeLoadBackend::default());
    let clock = Arc::new(ManualClock::at(1_000));
    let cache = Arc::new(BoardCache::new(
        Arc::clone(&backend) as Arc<dyn CollectionBackend<Load>>,
        Arc::new(MemoryWarmStart::default()),
        Arc::clone(&clock) as Arc<dyn Clock>,
        BoardConfig::loads(),
        principal(),
    ));

    Harness {
        backend,
        clock,
        cache,
    }
}

#[tokio::test]
async fn initialize_replaces_rows_and_clears_error() {
    let harness = harness();
    harness
        .backend
        .seed(vec![
            load_row("a", "L-1", "someone", None),
            load_row("b", "L-2", "someone", None),
        ])
        .await;

    let initialized = harness.cache.initialize().await;
    assert!(initialized.is_ok());
    assert_eq!(harness.cache.items().await.len(), 2);
    assert!(harness.cache.last_error().await.is_none());
}

#[tokio::test]
async fn failed_fetch_preserves_rows_and_surfaces_error() {
    let harness = harness();
    harness
        .backend
        .seed(vec![load_row("a", "L-1", "someone", None)])
        .await;
    assert!(harness.cache.initialize().await.is_ok());

    harness.backend.fail_list.store(true, Ordering::SeqCst);
    let refreshed = harness.cache.refresh().await;
    assert!(refreshed.is_err());
    assert_eq!(harness.cache.items().await.len(), 1);
    assert!(harness.cache.last_error().await.is_some());
}

#[tokio::test]
async fn create_inserts_at_head_and_records_last_created() {
    let harness = harness();
    harness
        .backend
        .seed(vec![load_row("a", "L-1", "someone", None)])
        .await;
    assert!(harness.cache.initialize().await.is_ok());

    let created = harness.cache.create(load_draft("L-9")).await;
    assert!(created.is_ok());

    let items = harness.cache.items().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].load_number, "L-9");
    assert_eq!(
        harness.cache.last_created().await.map(|row| row.load_number),
        Some("L-9".to_owned())
    );
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_backend() {
    let harness = harness();
    let mut bad = load_draft("");
    bad.rate = -5.0;

    let created = harness.cache.create(bad).await;
    assert!(created.is_err());
    assert!(harness.backend.rows.lock().await.is_empty());
    assert!(harness.cache.items().await.is_empty());
}

#[tokio::test]
async fn push_echo_within_window_keeps_the_local_copy() {
    let harness = harness();
    let created = harness.cache.create(load_draft("L-9")).await;
    assert!(created.is_ok());
    let created_id = match created.unwrap_or_else(|_| unreachable!()) {
        CreateOutcome::Persisted(row) => row.id,
        CreateOutcome::LocalOnly { .. } => unreachable!(),
    };

    // The self-caused echo arrives two seconds later.
    harness.clock.advance(2);
    let echo = load_row(created_id.as_str(), "L-9", "user-1", None);
    harness.cache.apply_push(vec![echo]).await;

    let items = harness.cache.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, created_id);
}

#[tokio::test]
async fn push_after_the_window_adopts_the_incoming_row() {
    let harness = harness();
    let created = harness.cache.create(load_draft("L-9")).await;
    assert!(created.is_ok());
    let created_id = match created.unwrap_or_else(|_| unreachable!()) {
        CreateOutcome::Persisted(row) => row.id,
        CreateOutcome::LocalOnly { .. } => unreachable!(),
    };

    harness.clock.advance(7);
    let mut fresher = load_row(created_id.as_str(), "L-9", "user-1", None);
    fresher.comment = Some("updated by dispatch".to_owned());
    harness.cache.apply_push(vec![fresher]).await;

    let items = harness.cache.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].comment.as_deref(), Some("updated by dispatch"));
}

#[tokio::test]
async fn push_retains_local_rows_missing_from_the_snapshot() {
    let harness = harness();
    let created = harness.cache.create(load_draft("L-9")).await;
    assert!(created.is_ok());

    harness.clock.advance(10);
    harness
        .cache
        .apply_push(vec![load_row("other", "L-2", "someone", None)])
        .await;

    let items = harness.cache.items().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].load_number, "L-9");
}

#[tokio::test]
async fn delete_removes_locally_even_when_the_backend_rejects() {
    let harness = harness();
    harness
        .backend
        .seed(vec![load_row("a", "L-1", "someone", None)])
        .await;
    assert!(harness.cache.initialize().await.is_ok());

    harness.backend.fail_delete.store(true, Ordering::SeqCst);
    let deleted = harness.cache.delete("a").await;
    assert!(deleted.is_err());
    assert!(harness.cache.items().await.is_empty());
}

#[tokio::test]
async fn filter_matches_case_insensitively_across_text_fields() {
    let harness = harness();
    let mut with_equipment = load_row("a", "L-1", "someone", None);
    with_equipment.equipment_requirement = Some("Tarps".to_owned());
    harness
        .backend
        .seed(vec![
            with_equipment,
            load_row("b", "L-2", "someone", None),
        ])
        .await;
    assert!(harness.cache.initialize().await.is_ok());

    let matched = harness.cache.filter("tarps").await;
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "a");

    let by_city = harness.cache.filter("DALLAS").await;
    assert_eq!(by_city.len(), 2);

    let unfiltered = harness.cache.filter("").await;
    assert_eq!(unfiltered.len(), 2);

    let none = harness.cache.filter("reefer").await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn mine_matches_identity_email_and_legacy_created_by() {
    let harness = harness();
    harness
        .backend
        .seed(vec![
            load_row("a", "L-1", "user-1", None),
            load_row("b", "L-2", "legacy", Some("broker@firm.example.com")),
            load_row("c", "L-3", "someone-else", None),
        ])
        .await;
    assert!(harness.cache.initialize().await.is_ok());

    let mine = harness.cache.mine().await;
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|row| row.id != "c"));
}

#[tokio::test]
async fn refresh_keeps_pending_optimistic_rows_until_the_server_reflects_them() {
    let harness = harness();
    let created = harness.cache.create(load_draft("L-9")).await;
    assert!(created.is_ok());

    // The server has not caught up yet: simulate a lagging list response.
    harness.backend.seed(Vec::new()).await;
    assert!(harness.cache.refresh().await.is_ok());
    let items = harness.cache.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].load_number, "L-9");

    // Once the server reflects the row, the pending copy is dropped.
    harness
        .backend
        .seed(vec![items[0].clone()])
        .await;
    assert!(harness.cache.refresh().await.is_ok());
    assert_eq!(harness.cache.items().await.len(), 1);
}

#[tokio::test]
async fn failed_create_on_loads_falls_back_to_a_local_row() {
    let harness = harness();
    harness.backend.fail_create.store(true, Ordering::SeqCst);

    let created = harness.cache.create(load_draft("L-9")).await;
    assert!(created.is_ok());
    let outcome = created.unwrap_or_else(|_| unreachable!());
    assert!(matches!(outcome, CreateOutcome::LocalOnly { .. }));
    assert!(outcome.item().id.starts_with("local-"));

    let items = harness.cache.items().await;
    assert_eq!(items.len(), 1);
    // A locally stashed row is not a successful create.
    assert!(harness.cache.last_created().await.is_none());
}

#[tokio::test]
async fn failed_create_on_trucks_surfaces_the_error() {
    let cache = BoardCache::new(
        Arc::new(FakeTruckBackend) as Arc<dyn CollectionBackend<Truck>>,
        Arc::new(MemoryWarmStart::default()),
        Arc::new(ManualClock::at(1_000)) as Arc<dyn Clock>,
        BoardConfig::trucks(),
        principal(),
    );

    let draft = TruckDraft {
        truck_number: "T-1".to_owned(),
        current_city: "Memphis, TN".to_owned(),
        destination_preference: None,
        available_date: date(2026, 9, 2),
        trailer_type: TrailerType::Reefer,
        comment: None,
    };

    let created = cache.create(draft).await;
    assert!(created.is_err());
    assert!(cache.items().await.is_empty());
}

#[tokio::test]
async fn warm_start_paints_cached_rows_before_the_first_fetch() {
    let backend = Arc::new(FakeLoadBackend::default());
    let warm = Arc::new(MemoryWarmStart::default());
    let payload = serde_json::to_string(&vec![load_row("a", "L-1", "someone", None)])
        .unwrap_or_default();
    assert!(warm.store("loads", payload).await.is_ok());

    let cache = BoardCache::new(
        backend as Arc<dyn CollectionBackend<Load>>,
        warm as Arc<dyn WarmStartCache>,
        Arc::new(ManualClock::at(1_000)) as Arc<dyn Clock>,
        BoardConfig::loads(),
        principal(),
    );

    cache.warm_start().await;
    assert_eq!(cache.items().await.len(), 1);
}

#[tokio::test]
async fn subscription_task_applies_push_batches() {
    let harness = harness();
    let task = harness.cache.spawn_subscription().await;
    assert!(task.is_ok());
    let _task = task.unwrap_or_else(|_| unreachable!());

    harness
        .backend
        .push(vec![load_row("a", "L-1", "someone", None)])
        .await;
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    assert_eq!(harness.cache.items().await.len(), 1);
}
