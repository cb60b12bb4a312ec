use super::error::AuthError;
use super::models::{Permission, User};
use super::password::verify_password;
use super::repository::UserRepository;
use super::session::{Session, SessionToken};
use super::session_store::{SessionRepository, SessionStore};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    sessions: SessionStore<dyn SessionRepository>,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        session_ttl_ms: u64,
    ) -> Self {
        Self {
            user_repo,
            sessions: SessionStore::new(sessions, session_ttl_ms),
        }
    }

    /// Authenticate a user by email and password
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Authenticate and open a bearer session
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client_ip: Option<String>,
    ) -> Result<Session, AuthError> {
        let user = match self.authenticate(email, password).await {
            Ok(user) => user,
            Err(e) => {
                warn!(email, "login rejected");
                return Err(e);
            }
        };

        let session = self.sessions.create_session(user, client_ip).await?;
        debug!(user_id = session.user.id, "session created");
        Ok(session)
    }

    /// Resolve a bearer token to its user
    pub async fn validate_token(&self, token: &SessionToken) -> Result<User, AuthError> {
        self.sessions
            .validate_session(token)
            .await
            .map_err(|_| AuthError::InvalidCredentials)
    }

    pub async fn logout(&self, token: &SessionToken) -> Result<bool, AuthError> {
        Ok(self.sessions.invalidate_session(token).await?)
    }

    /// Check if a user has a specific permission
    pub fn authorize(&self, user: &User, permission: Permission) -> Result<(), AuthError> {
        if user.role.has_permission(&permission) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied)
        }
    }
}
