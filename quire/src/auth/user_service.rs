use super::error::AuthError;
use super::models::{Role, User, UserUpdate};
use super::password::hash_password;
use super::repository::UserRepository;
use super::session_store::SessionRepository;
use chrono::Utc;
use shared::UserId;
use std::sync::Arc;
use tracing::info;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
}

fn validate_name(name: &str) -> Result<String, AuthError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AuthError::EmptyName);
    }
    Ok(name.to_string())
}

fn validate_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') =>
        {
            Ok(email.to_string())
        }
        _ => Err(AuthError::InvalidEmail),
    }
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            user_repo,
            sessions,
        }
    }

    /// Register a new user
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        let name = validate_name(name)?;
        let email = validate_email(email)?;

        if self.user_repo.email_exists(&email).await? {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password(password)?;
        let user = self
            .user_repo
            .create(User::new(name, email, password_hash, role))
            .await?;

        info!(user_id = user.id, role = ?user.role, "user registered");
        Ok(user)
    }

    pub async fn get_user(&self, id: UserId) -> Result<User, AuthError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        self.user_repo.list_all().await
    }

    /// Apply a partial update; a new password or role logs the user out everywhere
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, AuthError> {
        let mut user = self.get_user(id).await?;
        let mut revoke_sessions = false;

        if let Some(name) = update.name {
            user.name = validate_name(&name)?;
        }
        if let Some(email) = update.email {
            user.email = validate_email(&email)?;
        }
        if let Some(password) = update.password {
            user.password_hash = hash_password(&password)?;
            revoke_sessions = true;
        }
        if let Some(role) = update.role {
            revoke_sessions |= role != user.role;
            user.role = role;
        }
        user.updated_at = Utc::now();

        let user = self.user_repo.update(user).await?;

        if revoke_sessions {
            let revoked = self.sessions.delete_user_sessions(id).await?;
            info!(user_id = id, revoked, "sessions revoked after credential change");
        }

        Ok(user)
    }

    /// Delete a user; admins cannot delete their own account
    pub async fn delete_user(&self, id: UserId, requesting_user_id: UserId) -> Result<(), AuthError> {
        if id == requesting_user_id {
            return Err(AuthError::CannotDeleteSelf);
        }

        self.user_repo.delete(id).await?;
        self.sessions.delete_user_sessions(id).await?;

        info!(user_id = id, "user deleted");
        Ok(())
    }
}
