use super::error::AuthError;
use super::models::User;
use async_trait::async_trait;
use shared::UserId;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, assigning its id
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Find a user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError>;

    /// List all users ordered by id
    async fn list_all(&self) -> Result<Vec<User>, AuthError>;

    /// Update a user
    async fn update(&self, user: User) -> Result<User, AuthError>;

    /// Delete a user by ID
    async fn delete(&self, id: UserId) -> Result<(), AuthError>;

    /// Check if an email is registered
    async fn email_exists(&self, email: &str) -> Result<bool, AuthError>;
}
