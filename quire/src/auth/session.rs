use super::models::User;
use chrono::DateTime;
use std::time::{SystemTime, UNIX_EPOCH};

/// Session token type - a secure random string
pub type SessionToken = String;

/// Get current timestamp in milliseconds since Unix epoch
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Format a timestamp (ms since epoch) as ISO 8601 UTC string
pub fn format_utc_time(timestamp_ms: u64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms as i64)
        .unwrap_or_default()
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

/// A logged-in user's bearer session
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub user: User,
    pub created_at: u64,
    pub expires_at: u64,
    pub last_accessed: u64,
    pub client_ip: Option<String>,
}

impl Session {
    pub fn new(token: SessionToken, user: User, ttl_ms: u64, client_ip: Option<String>) -> Self {
        let now = current_timestamp_ms();

        Self {
            token,
            user,
            created_at: now,
            expires_at: now + ttl_ms,
            last_accessed: now,
            client_ip,
        }
    }

    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    pub fn touch(&mut self) {
        self.last_accessed = current_timestamp_ms();
    }

    pub fn expires_at_utc(&self) -> String {
        format_utc_time(self.expires_at)
    }

    pub fn remaining_ttl_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

/// Generate a cryptographically secure random session token
pub fn generate_session_token() -> SessionToken {
    use rand::Rng;

    // 32 random bytes as hex
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);

    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;

    fn reader() -> User {
        User::new(
            "Reader".to_string(),
            "reader@example.com".to_string(),
            "hash".to_string(),
            Role::Customer,
        )
    }

    #[test]
    fn test_generate_session_token() {
        let token1 = generate_session_token();
        let token2 = generate_session_token();

        assert_eq!(token1.len(), 64);
        assert_ne!(token1, token2);
        assert!(token1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_session_creation() {
        let session = Session::new(
            "token".to_string(),
            reader(),
            3_600_000,
            Some("127.0.0.1".to_string()),
        );

        assert_eq!(session.user.email, "reader@example.com");
        assert_eq!(session.client_ip.as_deref(), Some("127.0.0.1"));
        assert!(!session.is_expired());
        assert!(session.remaining_ttl_ms() > 0);
        assert!(session.expires_at_utc().ends_with('Z'));
    }

    #[test]
    fn test_session_expiration() {
        let session = Session::new("token".to_string(), reader(), 0, None);

        assert!(session.is_expired());
        assert_eq!(session.remaining_ttl_ms(), 0);
    }

    #[test]
    fn test_format_utc_time() {
        assert_eq!(format_utc_time(0), "1970-01-01T00:00:00Z");
    }
}
