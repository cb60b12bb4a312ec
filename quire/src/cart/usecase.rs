use super::error::CartError;
use super::locks::UserLocks;
use super::model::{AddItem, AdjustMode, Cart, Item};
use super::ports::CatalogLookup;
use super::repository::CartRepository;
use shared::{BookId, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shopping cart operations. Each mutation holds the user's lock from load to persist.
pub struct CartUseCase {
    repository: CartRepository,
    catalog: Arc<dyn CatalogLookup>,
    locks: UserLocks,
}

fn ensure_positive(qty: i64) -> Result<(), CartError> {
    if qty <= 0 {
        warn!(qty, "rejected non-positive quantity");
        return Err(CartError::InvalidQuantity(qty));
    }
    Ok(())
}

impl CartUseCase {
    pub fn new(repository: CartRepository, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self {
            repository,
            catalog,
            locks: UserLocks::new(),
        }
    }

    async fn price_of(&self, book_id: BookId) -> Result<i64, CartError> {
        self.catalog
            .book_price(book_id)
            .await
            .map_err(CartError::catalog)?
            .ok_or(CartError::BookNotFound(book_id))
    }

    async fn persist(&self, cart: Cart) -> Result<Cart, CartError> {
        self.repository.save(&cart).await?;
        debug!(
            user_id = cart.user_id,
            lines = cart.items.len(),
            total_price = cart.total_price,
            "cart saved"
        );
        Ok(cart)
    }

    pub async fn add_to_cart(&self, user_id: UserId, item: AddItem) -> Result<Cart, CartError> {
        ensure_positive(item.qty)?;
        let price = self.price_of(item.book_id).await?;

        let _guard = self.locks.lock(user_id).await;
        let mut cart = self.repository.load(user_id).await?;
        cart.add_item(item.book_id, price, item.qty)?;

        self.persist(cart).await
    }

    pub async fn get_cart(&self, user_id: UserId) -> Result<Cart, CartError> {
        self.repository.load(user_id).await
    }

    pub async fn update_quantity(
        &self,
        user_id: UserId,
        book_id: BookId,
        qty: i64,
    ) -> Result<Cart, CartError> {
        ensure_positive(qty)?;

        let _guard = self.locks.lock(user_id).await;
        let mut cart = self.repository.load(user_id).await?;
        cart.set_quantity(book_id, qty)?;

        self.persist(cart).await
    }

    /// Overwrite a line with the book's current unit price and the given quantity
    pub async fn replace_item(
        &self,
        user_id: UserId,
        book_id: BookId,
        qty: i64,
    ) -> Result<Cart, CartError> {
        ensure_positive(qty)?;
        let price = self.price_of(book_id).await?;

        let _guard = self.locks.lock(user_id).await;
        let mut cart = self.repository.load(user_id).await?;
        cart.replace_item(book_id, price, qty)?;

        self.persist(cart).await
    }

    /// Idempotent; an absent book leaves the cart as it was
    pub async fn remove_item(&self, user_id: UserId, book_id: BookId) -> Result<Cart, CartError> {
        let _guard = self.locks.lock(user_id).await;
        let mut cart = self.repository.load(user_id).await?;

        if !cart.remove_item(book_id)? {
            return Ok(cart);
        }

        self.persist(cart).await
    }

    pub async fn clear_cart(&self, user_id: UserId) -> Result<(), CartError> {
        let _guard = self.locks.lock(user_id).await;
        let existed = self.repository.delete(user_id).await?;
        debug!(user_id, existed, "cart cleared");
        Ok(())
    }

    pub async fn adjust_quantity(
        &self,
        user_id: UserId,
        book_id: BookId,
        mode: AdjustMode,
        qty: i64,
    ) -> Result<Cart, CartError> {
        ensure_positive(qty)?;
        let price = match mode {
            AdjustMode::Increase => self.price_of(book_id).await?,
            AdjustMode::Decrease | AdjustMode::Set => 0,
        };

        let _guard = self.locks.lock(user_id).await;
        let mut cart = self.repository.load(user_id).await?;
        cart.adjust_quantity(book_id, mode, qty, price)?;

        self.persist(cart).await
    }

    /// Replace every line at current catalog prices
    pub async fn replace_all(&self, user_id: UserId, items: Vec<AddItem>) -> Result<Cart, CartError> {
        for item in &items {
            ensure_positive(item.qty)?;
        }

        let mut prices: HashMap<BookId, i64> = HashMap::new();
        for item in &items {
            if !prices.contains_key(&item.book_id) {
                prices.insert(item.book_id, self.price_of(item.book_id).await?);
            }
        }

        let lines = items.into_iter().map(|item| Item {
            book_id: item.book_id,
            price: prices[&item.book_id],
            qty: item.qty,
        });

        let _guard = self.locks.lock(user_id).await;
        let mut cart = Cart::empty(user_id);
        cart.replace_all(lines)?;

        self.persist(cart).await
    }
}
