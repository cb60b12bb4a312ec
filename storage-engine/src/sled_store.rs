use async_trait::async_trait;
use bytes::Bytes;
use quire::cart::CartStore;
use shared::{Error, Result, UserId};
use std::path::Path;

const CARTS_TREE: &str = "carts";

fn cart_key(user_id: UserId) -> String {
    format!("cart:{user_id}")
}

/// Durable cart store on a sled tree, flushed after every write
pub struct SledCartStore {
    tree: sled::Tree,
}

impl SledCartStore {
    /// Open a dedicated database, creating the parent directory if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Internal(format!("Failed to create directory: {}", e)))?;
        }

        let db = sled::open(path)
            .map_err(|e| Error::Internal(format!("Failed to open Sled database: {}", e)))?;

        Self::from_db(&db)
    }

    /// Use the `carts` tree of an already open database
    pub fn from_db(db: &sled::Db) -> Result<Self> {
        let tree = db
            .open_tree(CARTS_TREE)
            .map_err(|e| Error::Internal(format!("Failed to open carts tree: {}", e)))?;

        Ok(Self { tree })
    }

    async fn flush(&self) -> Result<()> {
        self.tree
            .flush_async()
            .await
            .map_err(|e| Error::Internal(format!("Failed to flush database: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl CartStore for SledCartStore {
    async fn get(&self, user_id: UserId) -> Result<Option<Bytes>> {
        let value = self
            .tree
            .get(cart_key(user_id))
            .map_err(|e| Error::Internal(format!("Failed to get cart: {}", e)))?;

        Ok(value.map(|ivec| Bytes::copy_from_slice(&ivec)))
    }

    async fn set(&self, user_id: UserId, value: Bytes) -> Result<()> {
        self.tree
            .insert(cart_key(user_id), value.as_ref())
            .map_err(|e| Error::Internal(format!("Failed to save cart: {}", e)))?;

        self.flush().await
    }

    async fn delete(&self, user_id: UserId) -> Result<bool> {
        let removed = self
            .tree
            .remove(cart_key(user_id))
            .map_err(|e| Error::Internal(format!("Failed to delete cart: {}", e)))?
            .is_some();

        self.flush().await?;
        Ok(removed)
    }
}
