use super::error::AuthError;
use super::models::User;
use super::repository::UserRepository;
use async_trait::async_trait;
use shared::UserId;
use sled::Db;
use std::path::Path;

const USERS_TREE: &str = "users";
const USERS_BY_EMAIL_TREE: &str = "users_by_email";

/// Emails are unique regardless of case
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone)]
pub struct SledUserRepository {
    db: Db,
}

impl SledUserRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, AuthError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Share a database handle already opened by the caller
    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    fn users_tree(&self) -> Result<sled::Tree, AuthError> {
        Ok(self.db.open_tree(USERS_TREE)?)
    }

    fn users_by_email_tree(&self) -> Result<sled::Tree, AuthError> {
        Ok(self.db.open_tree(USERS_BY_EMAIL_TREE)?)
    }
}

#[async_trait]
impl UserRepository for SledUserRepository {
    async fn create(&self, mut user: User) -> Result<User, AuthError> {
        if self.email_exists(&user.email).await? {
            return Err(AuthError::EmailAlreadyExists);
        }

        let users_tree = self.users_tree()?;
        let email_tree = self.users_by_email_tree()?;

        user.id = self.db.generate_id()? + 1;
        let user_json = serde_json::to_vec(&user)?;
        let key = user.id.to_be_bytes();

        // Store user by ID
        users_tree.insert(key, user_json)?;

        // Store ID by email for lookups
        email_tree.insert(normalize_email(&user.email).as_bytes(), &key)?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let email_tree = self.users_by_email_tree()?;
        let users_tree = self.users_tree()?;

        if let Some(user_id) = email_tree.get(normalize_email(email).as_bytes())? {
            if let Some(user_data) = users_tree.get(&user_id)? {
                let user: User = serde_json::from_slice(&user_data)?;
                return Ok(Some(user));
            }
        }

        Ok(None)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError> {
        let users_tree = self.users_tree()?;

        if let Some(user_data) = users_tree.get(id.to_be_bytes())? {
            let user: User = serde_json::from_slice(&user_data)?;
            return Ok(Some(user));
        }

        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<User>, AuthError> {
        let users_tree = self.users_tree()?;
        let mut users = Vec::new();

        // Big-endian keys iterate in id order
        for item in users_tree.iter() {
            let (_, user_data) = item?;
            let user: User = serde_json::from_slice(&user_data)?;
            users.push(user);
        }

        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, AuthError> {
        let users_tree = self.users_tree()?;
        let email_tree = self.users_by_email_tree()?;
        let key = user.id.to_be_bytes();

        let previous: User = match users_tree.get(key)? {
            Some(data) => serde_json::from_slice(&data)?,
            None => return Err(AuthError::UserNotFound),
        };

        let old_email = normalize_email(&previous.email);
        let new_email = normalize_email(&user.email);

        if old_email != new_email {
            if let Some(owner) = email_tree.get(new_email.as_bytes())? {
                if owner.as_ref() != key.as_slice() {
                    return Err(AuthError::EmailAlreadyExists);
                }
            }
            email_tree.remove(old_email.as_bytes())?;
        }

        let user_json = serde_json::to_vec(&user)?;
        users_tree.insert(key, user_json)?;
        email_tree.insert(new_email.as_bytes(), &key)?;

        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<(), AuthError> {
        let users_tree = self.users_tree()?;
        let email_tree = self.users_by_email_tree()?;

        if let Some(user_data) = users_tree.remove(id.to_be_bytes())? {
            let user: User = serde_json::from_slice(&user_data)?;
            email_tree.remove(normalize_email(&user.email).as_bytes())?;
            Ok(())
        } else {
            Err(AuthError::UserNotFound)
        }
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let email_tree = self.users_by_email_tree()?;
        Ok(email_tree.contains_key(normalize_email(email).as_bytes())?)
    }
}
