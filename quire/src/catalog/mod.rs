pub mod book_service;
pub mod category_service;
pub mod error;
pub mod models;
pub mod repository;
pub mod sled_repository;

pub use book_service::BookService;
pub use category_service::CategoryService;
pub use error::CatalogError;
pub use models::{Book, BookDetails, BookUpdate, Category, CategoryDetails, CategoryId, NewBook};
pub use repository::{BookRepository, CategoryRepository};
pub use sled_repository::{SledBookRepository, SledCategoryRepository};
