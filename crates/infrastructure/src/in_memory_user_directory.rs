//! In-memory user directory keyed by login email.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use freightline_application::{UserDirectory, UserProfileRecord};
use freightline_core::{AppError, AppResult};
use tokio::sync::RwLock;

/// Directory adapter over an in-memory record map.
///
/// `set_unavailable` makes lookups fail with a transport error, for
/// exercising the session resolver's token-only degradation path.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    records: RwLock<HashMap<String, UserProfileRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for `email`.
    ///
    /// Emails are matched case-insensitively, so the key is lowercased.
    pub async fn upsert(&self, email: &str, record: UserProfileRecord) {
        self.records
            .write()
            .await
            .insert(email.to_lowercase(), record);
    }

    /// Switches the simulated directory outage on or off.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserProfileRecord>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Transport("user directory unavailable".to_owned()));
        }

        Ok(self.records.read().await.get(&email.to_lowercase()).cloned())
    }
}
