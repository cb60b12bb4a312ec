use super::error::AuthError;
use super::models::{Role, User};
use super::password::hash_password;
use super::repository::UserRepository;
use tracing::info;

/// Build the default admin user
pub fn create_default_admin(name: String, email: String, password: String) -> Result<User, AuthError> {
    let password_hash = hash_password(&password)?;
    Ok(User::new(name, email, password_hash, Role::Admin))
}

/// Seed the admin account unless its email is already registered
pub async fn ensure_default_admin(
    user_repo: &dyn UserRepository,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Option<User>, AuthError> {
    if user_repo.email_exists(email).await? {
        return Ok(None);
    }

    let admin = create_default_admin(name.to_string(), email.to_string(), password.to_string())?;
    let admin = user_repo.create(admin).await?;
    info!(user_id = admin.id, email, "default admin created");

    Ok(Some(admin))
}
