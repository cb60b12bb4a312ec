use super::error::CatalogError;
use super::models::{Book, BookDetails, BookUpdate, Category, CategoryId, NewBook, MAX_RATING};
use super::repository::{BookRepository, CategoryRepository};
use crate::cart::ports::CatalogLookup;
use async_trait::async_trait;
use chrono::Utc;
use shared::BookId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub struct BookService {
    books: Arc<dyn BookRepository>,
    categories: Arc<dyn CategoryRepository>,
}

fn required(field: &'static str, value: &str) -> Result<String, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::validation(field, "cannot be empty"));
    }
    Ok(value.to_string())
}

fn validate_book(book: &mut Book) -> Result<(), CatalogError> {
    book.title = required("title", &book.title)?;
    book.author = required("author", &book.author)?;

    if book.price < 0 {
        return Err(CatalogError::validation("price", "must not be negative"));
    }
    if !(0..=MAX_RATING).contains(&book.rating) {
        return Err(CatalogError::validation(
            "rating",
            format!("must be between 0 and {MAX_RATING}"),
        ));
    }

    Ok(())
}

impl BookService {
    pub fn new(books: Arc<dyn BookRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { books, categories }
    }

    async fn resolve_category(
        &self,
        category_id: Option<CategoryId>,
    ) -> Result<Option<Category>, CatalogError> {
        match category_id {
            Some(id) => self
                .categories
                .find_by_id(id)
                .await?
                .map(Some)
                .ok_or(CatalogError::CategoryNotFound(id)),
            None => Ok(None),
        }
    }

    pub async fn create(&self, fields: NewBook) -> Result<BookDetails, CatalogError> {
        let mut book = Book::new(fields);
        validate_book(&mut book)?;
        let category = self.resolve_category(book.category_id).await?;

        let book = self.books.create(book).await?;
        info!(book_id = book.id, price = book.price, "book created");

        Ok(BookDetails { book, category })
    }

    /// Every book with its category embedded
    pub async fn list(&self) -> Result<Vec<BookDetails>, CatalogError> {
        let categories: HashMap<CategoryId, Category> = self
            .categories
            .list_all()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(self
            .books
            .list_all()
            .await?
            .into_iter()
            .map(|book| {
                let category = book.category_id.and_then(|id| categories.get(&id).cloned());
                BookDetails { book, category }
            })
            .collect())
    }

    pub async fn get(&self, id: BookId) -> Result<BookDetails, CatalogError> {
        let book = self
            .books
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::BookNotFound(id))?;
        // A dangling category reference reads as uncategorised
        let category = match book.category_id {
            Some(category_id) => self.categories.find_by_id(category_id).await?,
            None => None,
        };

        Ok(BookDetails { book, category })
    }

    pub async fn update(&self, id: BookId, update: BookUpdate) -> Result<BookDetails, CatalogError> {
        let mut book = self
            .books
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::BookNotFound(id))?;

        if let Some(title) = update.title {
            book.title = title;
        }
        if let Some(description) = update.description {
            book.description = description;
        }
        if let Some(author) = update.author {
            book.author = author;
        }
        if let Some(price) = update.price {
            book.price = price;
        }
        if let Some(rating) = update.rating {
            book.rating = rating;
        }
        if let Some(category_id) = update.category_id {
            book.category_id = category_id;
        }
        validate_book(&mut book)?;
        let category = self.resolve_category(book.category_id).await?;

        book.updated_at = Utc::now();
        let book = self.books.update(book).await?;
        info!(book_id = id, "book updated");

        Ok(BookDetails { book, category })
    }

    pub async fn delete(&self, id: BookId) -> Result<(), CatalogError> {
        self.books.delete(id).await?;
        info!(book_id = id, "book deleted");
        Ok(())
    }
}

#[async_trait]
impl CatalogLookup for BookService {
    async fn book_price(&self, book_id: BookId) -> shared::Result<Option<i64>> {
        self.books
            .find_by_id(book_id)
            .await
            .map(|book| book.map(|b| b.price))
            .map_err(|e| shared::Error::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sled_repository::{SledBookRepository, SledCategoryRepository};
    use tempfile::TempDir;

    fn setup(temp_dir: &TempDir) -> (BookService, Arc<SledCategoryRepository>) {
        let db = sled::open(temp_dir.path().join("catalog.sled")).unwrap();
        let books = Arc::new(SledBookRepository::from_db(db.clone()));
        let categories = Arc::new(SledCategoryRepository::from_db(db));
        (BookService::new(books, categories.clone()), categories)
    }

    fn dune() -> NewBook {
        NewBook {
            title: "Dune".to_string(),
            description: "Desert planet".to_string(),
            author: "Frank Herbert".to_string(),
            price: 1299,
            rating: 5,
            category_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_with_category() {
        let temp_dir = TempDir::new().unwrap();
        let (service, categories) = setup(&temp_dir);

        let scifi = categories
            .create(Category::new("Science Fiction".to_string()))
            .await
            .unwrap();

        let created = service
            .create(NewBook {
                category_id: Some(scifi.id),
                ..dune()
            })
            .await
            .unwrap();
        assert_eq!(created.category.as_ref().unwrap().name, "Science Fiction");

        let fetched = service.get(created.book.id).await.unwrap();
        assert_eq!(fetched.book.title, "Dune");
        assert_eq!(fetched.category.unwrap().id, scifi.id);

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].category.is_some());
    }

    #[tokio::test]
    async fn test_validation() {
        let temp_dir = TempDir::new().unwrap();
        let (service, _) = setup(&temp_dir);

        let result = service.create(NewBook { price: -1, ..dune() }).await;
        assert!(matches!(result, Err(CatalogError::Validation { field: "price", .. })));

        let result = service.create(NewBook { rating: 6, ..dune() }).await;
        assert!(matches!(result, Err(CatalogError::Validation { field: "rating", .. })));

        let result = service
            .create(NewBook {
                title: " ".to_string(),
                ..dune()
            })
            .await;
        assert!(matches!(result, Err(CatalogError::Validation { field: "title", .. })));

        let result = service
            .create(NewBook {
                category_id: Some(99),
                ..dune()
            })
            .await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(99))));

        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_price_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let (service, _) = setup(&temp_dir);

        let created = service.create(dune()).await.unwrap();
        let id = created.book.id;
        assert_eq!(service.book_price(id).await.unwrap(), Some(1299));

        let updated = service
            .update(
                id,
                BookUpdate {
                    price: Some(999),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.book.price, 999);
        assert_eq!(updated.book.title, "Dune");
        assert_eq!(service.book_price(id).await.unwrap(), Some(999));

        service.delete(id).await.unwrap();
        assert_eq!(service.book_price(id).await.unwrap(), None);
        assert!(matches!(
            service.update(id, BookUpdate::default()).await,
            Err(CatalogError::BookNotFound(_))
        ));
    }
}
