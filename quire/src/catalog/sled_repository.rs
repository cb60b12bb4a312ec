use super::error::CatalogError;
use super::models::{Book, Category, CategoryId};
use super::repository::{BookRepository, CategoryRepository};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::BookId;
use sled::{Db, Tree};
use std::path::Path;

const BOOKS_TREE: &str = "books";
const CATEGORIES_TREE: &str = "categories";

fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, CatalogError> {
    Ok(serde_json::from_slice(data)?)
}

fn decode_all<T: DeserializeOwned>(tree: &Tree) -> Result<Vec<T>, CatalogError> {
    let mut records = Vec::new();

    // Big-endian keys iterate in id order
    for item in tree.iter() {
        let (_, data) = item?;
        records.push(decode(&data)?);
    }

    Ok(records)
}

#[derive(Clone)]
pub struct SledBookRepository {
    db: Db,
}

impl SledBookRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    fn books_tree(&self) -> Result<Tree, CatalogError> {
        Ok(self.db.open_tree(BOOKS_TREE)?)
    }
}

#[async_trait]
impl BookRepository for SledBookRepository {
    async fn create(&self, mut book: Book) -> Result<Book, CatalogError> {
        book.id = self.db.generate_id()? + 1;
        self.books_tree()?
            .insert(book.id.to_be_bytes(), serde_json::to_vec(&book)?)?;
        Ok(book)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, CatalogError> {
        match self.books_tree()?.get(id.to_be_bytes())? {
            Some(data) => Ok(Some(decode(&data)?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Book>, CatalogError> {
        decode_all(&self.books_tree()?)
    }

    async fn list_by_category(&self, category_id: CategoryId) -> Result<Vec<Book>, CatalogError> {
        let books: Vec<Book> = decode_all(&self.books_tree()?)?;
        Ok(books
            .into_iter()
            .filter(|b| b.category_id == Some(category_id))
            .collect())
    }

    async fn update(&self, book: Book) -> Result<Book, CatalogError> {
        let tree = self.books_tree()?;
        let key = book.id.to_be_bytes();

        if !tree.contains_key(key)? {
            return Err(CatalogError::BookNotFound(book.id));
        }

        tree.insert(key, serde_json::to_vec(&book)?)?;
        Ok(book)
    }

    async fn delete(&self, id: BookId) -> Result<(), CatalogError> {
        match self.books_tree()?.remove(id.to_be_bytes())? {
            Some(_) => Ok(()),
            None => Err(CatalogError::BookNotFound(id)),
        }
    }
}

#[derive(Clone)]
pub struct SledCategoryRepository {
    db: Db,
}

impl SledCategoryRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    fn categories_tree(&self) -> Result<Tree, CatalogError> {
        Ok(self.db.open_tree(CATEGORIES_TREE)?)
    }
}

#[async_trait]
impl CategoryRepository for SledCategoryRepository {
    async fn create(&self, mut category: Category) -> Result<Category, CatalogError> {
        category.id = self.db.generate_id()? + 1;
        self.categories_tree()?
            .insert(category.id.to_be_bytes(), serde_json::to_vec(&category)?)?;
        Ok(category)
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CatalogError> {
        match self.categories_tree()?.get(id.to_be_bytes())? {
            Some(data) => Ok(Some(decode(&data)?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Category>, CatalogError> {
        decode_all(&self.categories_tree()?)
    }

    async fn update(&self, category: Category) -> Result<Category, CatalogError> {
        let tree = self.categories_tree()?;
        let key = category.id.to_be_bytes();

        if !tree.contains_key(key)? {
            return Err(CatalogError::CategoryNotFound(category.id));
        }

        tree.insert(key, serde_json::to_vec(&category)?)?;
        Ok(category)
    }

    async fn delete(&self, id: CategoryId) -> Result<(), CatalogError> {
        match self.categories_tree()?.remove(id.to_be_bytes())? {
            Some(_) => Ok(()),
            None => Err(CatalogError::CategoryNotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::NewBook;
    use tempfile::TempDir;

    fn book(title: &str, category_id: Option<CategoryId>) -> Book {
        Book::new(NewBook {
            title: title.to_string(),
            description: String::new(),
            author: "Anon".to_string(),
            price: 500,
            rating: 3,
            category_id,
        })
    }

    #[tokio::test]
    async fn test_book_repository() {
        let temp_dir = TempDir::new().unwrap();
        let db = sled::open(temp_dir.path().join("catalog.sled")).unwrap();
        let repo = SledBookRepository::from_db(db);

        let first = repo.create(book("First", Some(1))).await.unwrap();
        let second = repo.create(book("Second", None)).await.unwrap();
        assert!(second.id > first.id);

        let found = repo.find_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(found.title, "First");

        let titles: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);

        assert_eq!(repo.list_by_category(1).await.unwrap().len(), 1);

        repo.delete(first.id).await.unwrap();
        assert!(repo.find_by_id(first.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(first.id).await,
            Err(CatalogError::BookNotFound(_))
        ));
        assert!(matches!(
            repo.update(first).await,
            Err(CatalogError::BookNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_category_repository() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SledCategoryRepository::new(temp_dir.path().join("catalog.sled")).unwrap();

        let mut created = repo.create(Category::new("Fiction".to_string())).await.unwrap();
        created.name = "Novels".to_string();
        repo.update(created.clone()).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Novels");
        assert_eq!(repo.list_all().await.unwrap().len(), 1);

        repo.delete(created.id).await.unwrap();
        assert!(repo.list_all().await.unwrap().is_empty());
    }
}
