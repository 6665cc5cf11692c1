//! In-memory identity pool for the deletion helper.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use freightline_application::IdentityAdmin;
use freightline_core::AppResult;
use tokio::sync::RwLock;

/// Identity-pool adapter backed by per-pool username sets.
#[derive(Default)]
pub struct InMemoryIdentityPool {
    pools: RwLock<HashMap<String, HashSet<String>>>,
}

impl InMemoryIdentityPool {
    /// Creates an adapter with no pools.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `username` in `pool`, creating the pool if needed.
    pub async fn register(&self, username: &str, pool: &str) {
        self.pools
            .write()
            .await
            .entry(pool.to_owned())
            .or_default()
            .insert(username.to_owned());
    }

    /// Returns whether `username` currently exists in `pool`.
    pub async fn contains(&self, username: &str, pool: &str) -> bool {
        self.pools
            .read()
            .await
            .get(pool)
            .is_some_and(|members| members.contains(username))
    }
}

#[async_trait]
impl IdentityAdmin for InMemoryIdentityPool {
    async fn delete_identity(&self, username: &str, pool: &str) -> AppResult<bool> {
        let mut pools = self.pools.write().await;
        let existed = pools
            .get_mut(pool)
            .is_some_and(|members| members.remove(username));
        Ok(existed)
    }
}
