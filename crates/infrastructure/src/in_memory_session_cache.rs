//! In-memory warm-start cache keyed by collection.

use std::collections::HashMap;

use async_trait::async_trait;
use freightline_application::WarmStartCache;
use freightline_core::AppResult;
use tokio::sync::RwLock;

/// Session-scoped warm-start store backed by a hash map.
#[derive(Default)]
pub struct InMemorySessionCache {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WarmStartCache for InMemorySessionCache {
    async fn load(&self, collection_key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(collection_key).cloned())
    }

    async fn store(&self, collection_key: &str, payload: String) -> AppResult<()> {
        self.entries
            .write()
            .await
            .insert(collection_key.to_owned(), payload);
        Ok(())
    }
}
