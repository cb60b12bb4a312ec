use shared::BookId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Quantity must be greater than zero, got {0}")]
    InvalidQuantity(i64),

    #[error("Quantity or total exceeds the supported range")]
    QuantityTooLarge,

    #[error("Book {0} not found")]
    BookNotFound(BookId),

    #[error("Book {0} is not in the cart")]
    ItemNotInCart(BookId),

    #[error("Cart storage unavailable: {0}")]
    CartUnavailable(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),
}

impl CartError {
    pub(crate) fn store(err: shared::Error) -> Self {
        CartError::CartUnavailable(err.to_string())
    }

    pub(crate) fn catalog(err: shared::Error) -> Self {
        CartError::CatalogUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for CartError {
    fn from(err: serde_json::Error) -> Self {
        CartError::CartUnavailable(format!("corrupt cart snapshot: {err}"))
    }
}
