use async_trait::async_trait;
use bytes::Bytes;
use moka::future::Cache;
use quire::cart::CartStore;
use shared::{Result, UserId};
use std::fmt::Debug;

/// Moka-backed cart store. Entries never expire; they are lost on restart.
pub struct MokaCartStore {
    cache: Cache<UserId, Bytes>,
}

impl MokaCartStore {
    /// Create a named store, optionally bounded to `max_entries` carts
    pub fn new(name: &str, max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder().name(name);

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        Self {
            cache: builder.build(),
        }
    }

    pub fn unbounded() -> Self {
        Self::new("carts", None)
    }
}

#[async_trait]
impl CartStore for MokaCartStore {
    async fn get(&self, user_id: UserId) -> Result<Option<Bytes>> {
        Ok(self.cache.get(&user_id).await)
    }

    async fn set(&self, user_id: UserId, value: Bytes) -> Result<()> {
        self.cache.insert(user_id, value).await;
        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> Result<bool> {
        Ok(self.cache.remove(&user_id).await.is_some())
    }
}

impl Debug for MokaCartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCartStore")
            .field("entry_count", &self.cache.entry_count())
            .field("weighted_size", &self.cache.weighted_size())
            .finish()
    }
}
