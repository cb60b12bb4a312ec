use super::error::CartError;
use super::model::Cart;
use super::ports::CartStore;
use bytes::Bytes;
use shared::UserId;
use std::sync::Arc;
use tracing::error;

/// Typed access to cart snapshots over a byte store
#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn CartStore>,
}

impl CartRepository {
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self { store }
    }

    /// The stored cart, or an empty one when the user has none
    pub async fn load(&self, user_id: UserId) -> Result<Cart, CartError> {
        let raw = self.store.get(user_id).await.map_err(|e| {
            error!(user_id, error = %e, "failed to read cart");
            CartError::store(e)
        })?;

        match raw {
            Some(bytes) => {
                let mut cart: Cart = serde_json::from_slice(&bytes).map_err(|e| {
                    error!(user_id, error = %e, "corrupt cart snapshot");
                    CartError::from(e)
                })?;
                cart.user_id = user_id;
                cart.recompute_totals().map_err(|_| {
                    error!(user_id, "cart snapshot totals out of range");
                    CartError::CartUnavailable("corrupt cart snapshot: totals out of range".to_string())
                })?;
                Ok(cart)
            }
            None => Ok(Cart::empty(user_id)),
        }
    }

    pub async fn save(&self, cart: &Cart) -> Result<(), CartError> {
        let bytes = Bytes::from(serde_json::to_vec(cart)?);
        self.store.set(cart.user_id, bytes).await.map_err(|e| {
            error!(user_id = cart.user_id, error = %e, "failed to write cart");
            CartError::store(e)
        })
    }

    pub async fn delete(&self, user_id: UserId) -> Result<bool, CartError> {
        self.store.delete(user_id).await.map_err(|e| {
            error!(user_id, error = %e, "failed to delete cart");
            CartError::store(e)
        })
    }
}
