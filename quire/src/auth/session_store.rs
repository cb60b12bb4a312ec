use super::models::User;
use super::session::{Session, SessionToken};
use async_trait::async_trait;
use shared::{Result, UserId};
use std::sync::Arc;

/// Trait for session storage operations
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create a new session for the given user
    async fn create_session(
        &self,
        user: User,
        ttl_ms: u64,
        client_ip: Option<String>,
    ) -> Result<Session>;

    /// Get a live session by token, refreshing its last access time
    async fn get_session(&self, token: &SessionToken) -> Result<Session>;

    /// Delete a session (logout)
    async fn delete_session(&self, token: &SessionToken) -> Result<bool>;

    /// Get all active sessions for a user
    async fn get_user_sessions(&self, user_id: UserId) -> Result<Vec<Session>>;

    /// Delete all sessions for a user (password change, account removal)
    async fn delete_user_sessions(&self, user_id: UserId) -> Result<usize>;
}

/// Session store service
pub struct SessionStore<S: SessionRepository + ?Sized> {
    repository: Arc<S>,
    ttl_ms: u64,
}

impl<S: SessionRepository + ?Sized> SessionStore<S> {
    pub fn new(repository: Arc<S>, ttl_ms: u64) -> Self {
        Self { repository, ttl_ms }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Start a session for an authenticated user
    pub async fn create_session(&self, user: User, client_ip: Option<String>) -> Result<Session> {
        self.repository
            .create_session(user, self.ttl_ms, client_ip)
            .await
    }

    /// Validate a session token and return the associated user
    pub async fn validate_session(&self, token: &SessionToken) -> Result<User> {
        Ok(self.repository.get_session(token).await?.user)
    }

    /// Invalidate a session (logout)
    pub async fn invalidate_session(&self, token: &SessionToken) -> Result<bool> {
        self.repository.delete_session(token).await
    }

    pub async fn get_user_sessions(&self, user_id: UserId) -> Result<Vec<Session>> {
        self.repository.get_user_sessions(user_id).await
    }

    /// Invalidate all sessions for a user (logout all devices)
    pub async fn invalidate_user_sessions(&self, user_id: UserId) -> Result<usize> {
        self.repository.delete_user_sessions(user_id).await
    }
}
