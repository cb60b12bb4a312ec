use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::BookId;

pub type CategoryId = u64;

pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub description: String,
    pub author: String,
    /// Unit price in minor currency units
    pub price: i64,
    pub rating: i32,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a book
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub author: String,
    pub price: i64,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl Book {
    pub fn new(fields: NewBook) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: fields.title,
            description: fields.description,
            author: fields.author,
            price: fields.price,
            rating: fields.rating,
            category_id: fields.category_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; `category_id: Some(None)` detaches the category
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub price: Option<i64>,
    pub rating: Option<i32>,
    #[serde(default, with = "double_option")]
    pub category_id: Option<Option<CategoryId>>,
}

/// A book with its category resolved
#[derive(Debug, Clone, Serialize)]
pub struct BookDetails {
    #[serde(flatten)]
    pub book: Book,
    pub category: Option<Category>,
}

/// A category with the books filed under it
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDetails {
    #[serde(flatten)]
    pub category: Category,
    pub books: Vec<Book>,
}

// Distinguishes an absent field from an explicit null
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
