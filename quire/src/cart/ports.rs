use async_trait::async_trait;
use bytes::Bytes;
use shared::{BookId, Result, UserId};

/// Live pricing source for cart lines
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Current unit price of a book, `None` when the catalog has no such book
    async fn book_price(&self, book_id: BookId) -> Result<Option<i64>>;
}

/// Snapshot storage for carts, one opaque value per user and no expiry
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn get(&self, user_id: UserId) -> Result<Option<Bytes>>;

    async fn set(&self, user_id: UserId, value: Bytes) -> Result<()>;

    /// Returns whether an entry was removed
    async fn delete(&self, user_id: UserId) -> Result<bool>;
}
