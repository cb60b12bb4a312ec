use super::models::User;
use super::session::{generate_session_token, Session, SessionToken};
use super::session_store::SessionRepository;
use async_trait::async_trait;
use moka::future::Cache;
use parking_lot::RwLock;
use shared::{Result, UserId};
use std::sync::Arc;
use std::time::Duration;

/// Moka-based in-memory session repository with dual-index support
pub struct MokaSessionRepository {
    // Primary index: token -> session
    sessions: Cache<SessionToken, Session>,
    // Secondary index: user id -> session tokens
    user_sessions: Cache<UserId, Arc<RwLock<Vec<SessionToken>>>>,
}

impl MokaSessionRepository {
    pub fn new(max_sessions: Option<u64>, default_ttl: Option<Duration>) -> Self {
        let mut sessions_builder = Cache::builder();
        let mut user_sessions_builder = Cache::builder();

        if let Some(capacity) = max_sessions {
            sessions_builder = sessions_builder.max_capacity(capacity);
            user_sessions_builder = user_sessions_builder.max_capacity(capacity);
        }

        if let Some(ttl) = default_ttl {
            sessions_builder = sessions_builder.time_to_live(ttl);
            user_sessions_builder = user_sessions_builder.time_to_live(ttl);
        }

        Self {
            sessions: sessions_builder.build(),
            user_sessions: user_sessions_builder.build(),
        }
    }

    /// Unbounded, one day TTL
    pub fn with_defaults() -> Self {
        Self::new(None, Some(Duration::from_secs(86_400)))
    }

    async fn tokens_for(&self, user_id: UserId) -> Vec<SessionToken> {
        match self.user_sessions.get(&user_id).await {
            // Clone tokens to release lock before awaiting
            Some(tokens_lock) => tokens_lock.read().clone(),
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl SessionRepository for MokaSessionRepository {
    async fn create_session(
        &self,
        user: User,
        ttl_ms: u64,
        client_ip: Option<String>,
    ) -> Result<Session> {
        let token = generate_session_token();
        let user_id = user.id;
        let session = Session::new(token.clone(), user, ttl_ms, client_ip);

        self.sessions.insert(token.clone(), session.clone()).await;

        let tokens_lock = self
            .user_sessions
            .get_with(user_id, async { Arc::new(RwLock::new(Vec::new())) })
            .await;
        tokens_lock.write().push(token);

        Ok(session)
    }

    async fn get_session(&self, token: &SessionToken) -> Result<Session> {
        let mut session = self
            .sessions
            .get(token)
            .await
            .ok_or(shared::Error::NotFound)?;

        if session.is_expired() {
            self.delete_session(token).await?;
            return Err(shared::Error::NotFound);
        }

        session.touch();
        self.sessions.insert(token.clone(), session.clone()).await;

        Ok(session)
    }

    async fn delete_session(&self, token: &SessionToken) -> Result<bool> {
        let session = self.sessions.remove(token).await;

        if let Some(data) = &session {
            if let Some(tokens_lock) = self.user_sessions.get(&data.user.id).await {
                tokens_lock.write().retain(|t| t != token);
            }
        }

        Ok(session.is_some())
    }

    async fn get_user_sessions(&self, user_id: UserId) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();
        let mut live_tokens = Vec::new();

        for token in self.tokens_for(user_id).await {
            if let Some(session) = self.sessions.get(&token).await {
                if !session.is_expired() {
                    live_tokens.push(token);
                    sessions.push(session);
                }
            }
        }

        // Lazy cleanup of expired tokens
        if let Some(tokens_lock) = self.user_sessions.get(&user_id).await {
            tokens_lock.write().retain(|t| live_tokens.contains(t));
        }

        Ok(sessions)
    }

    async fn delete_user_sessions(&self, user_id: UserId) -> Result<usize> {
        let mut count = 0;

        for token in self.tokens_for(user_id).await {
            if self.sessions.remove(&token).await.is_some() {
                count += 1;
            }
        }
        self.user_sessions.invalidate(&user_id).await;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;

    fn user(id: UserId) -> User {
        let mut user = User::new(
            format!("user{id}"),
            format!("user{id}@example.com"),
            "hash".to_string(),
            Role::Customer,
        );
        user.id = id;
        user
    }

    #[tokio::test]
    async fn test_create_and_validate_session() {
        let repo = MokaSessionRepository::with_defaults();

        let session = repo
            .create_session(user(1), 3_600_000, Some("192.168.1.1".to_string()))
            .await
            .unwrap();
        assert!(!session.token.is_empty());

        let retrieved = repo.get_session(&session.token).await.unwrap();
        assert_eq!(retrieved.user.id, 1);
        assert!(retrieved.last_accessed >= session.last_accessed);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let repo = MokaSessionRepository::with_defaults();
        let session = repo.create_session(user(1), 3_600_000, None).await.unwrap();

        assert!(repo.delete_session(&session.token).await.unwrap());
        assert!(!repo.delete_session(&session.token).await.unwrap());
        assert!(repo.get_session(&session.token).await.is_err());
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected() {
        let repo = MokaSessionRepository::with_defaults();
        let session = repo.create_session(user(1), 0, None).await.unwrap();

        assert!(matches!(
            repo.get_session(&session.token).await,
            Err(shared::Error::NotFound)
        ));
        assert!(repo.get_user_sessions(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_user_sessions() {
        let repo = MokaSessionRepository::with_defaults();

        repo.create_session(user(1), 3_600_000, None).await.unwrap();
        repo.create_session(user(1), 3_600_000, None).await.unwrap();
        let other = repo.create_session(user(2), 3_600_000, None).await.unwrap();

        assert_eq!(repo.get_user_sessions(1).await.unwrap().len(), 2);
        assert_eq!(repo.delete_user_sessions(1).await.unwrap(), 2);
        assert!(repo.get_user_sessions(1).await.unwrap().is_empty());

        // Other users keep their sessions
        assert!(repo.get_session(&other.token).await.is_ok());
    }
}
