use super::error::CatalogError;
use super::models::{Book, Category, CategoryId};
use async_trait::async_trait;
use shared::BookId;

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Persist a new book, assigning its id
    async fn create(&self, book: Book) -> Result<Book, CatalogError>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, CatalogError>;

    /// All books ordered by id
    async fn list_all(&self) -> Result<Vec<Book>, CatalogError>;

    async fn list_by_category(&self, category_id: CategoryId) -> Result<Vec<Book>, CatalogError>;

    async fn update(&self, book: Book) -> Result<Book, CatalogError>;

    async fn delete(&self, id: BookId) -> Result<(), CatalogError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist a new category, assigning its id
    async fn create(&self, category: Category) -> Result<Category, CatalogError>;

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CatalogError>;

    /// All categories ordered by id
    async fn list_all(&self) -> Result<Vec<Category>, CatalogError>;

    async fn update(&self, category: Category) -> Result<Category, CatalogError>;

    async fn delete(&self, id: CategoryId) -> Result<(), CatalogError>;
}
