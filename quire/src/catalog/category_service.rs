use super::error::CatalogError;
use super::models::{Category, CategoryDetails, CategoryId};
use super::repository::{BookRepository, CategoryRepository};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    books: Arc<dyn BookRepository>,
}

fn validate_name(name: &str) -> Result<String, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::validation("name", "cannot be empty"));
    }
    Ok(name.to_string())
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { categories, books }
    }

    pub async fn create(&self, name: &str) -> Result<Category, CatalogError> {
        let category = self
            .categories
            .create(Category::new(validate_name(name)?))
            .await?;
        info!(category_id = category.id, "category created");
        Ok(category)
    }

    pub async fn list(&self) -> Result<Vec<Category>, CatalogError> {
        self.categories.list_all().await
    }

    /// A category together with its books
    pub async fn get(&self, id: CategoryId) -> Result<CategoryDetails, CatalogError> {
        let category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;
        let books = self.books.list_by_category(id).await?;

        Ok(CategoryDetails { category, books })
    }

    pub async fn rename(&self, id: CategoryId, name: &str) -> Result<Category, CatalogError> {
        let name = validate_name(name)?;
        let mut category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        category.name = name;
        category.updated_at = Utc::now();
        self.categories.update(category).await
    }

    /// Refuses while any book is still filed under the category
    pub async fn delete(&self, id: CategoryId) -> Result<(), CatalogError> {
        if !self.books.list_by_category(id).await?.is_empty() {
            return Err(CatalogError::CategoryInUse(id));
        }

        self.categories.delete(id).await?;
        info!(category_id = id, "category deleted");
        Ok(())
    }
}
