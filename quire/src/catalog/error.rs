use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Book {0} not found")]
    BookNotFound(u64),

    #[error("Category {0} not found")]
    CategoryNotFound(u64),

    #[error("Category {0} still has books")]
    CategoryInUse(u64),

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CatalogError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        CatalogError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<sled::Error> for CatalogError {
    fn from(err: sled::Error) -> Self {
        CatalogError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SerializationError(err.to_string())
    }
}
