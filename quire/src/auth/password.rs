use argon2::password_hash::rand_core::OsRng;
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::error::AuthError;

/// Accepted shape of an account password
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub min_chars: usize,
    pub require_letter: bool,
    pub require_digit: bool,
}

impl PasswordPolicy {
    /// Six characters, mixing letters and digits
    pub const ACCOUNT: Self = Self {
        min_chars: 6,
        require_letter: true,
        require_digit: true,
    };

    pub fn check(&self, password: &str) -> Result<(), AuthError> {
        let long_enough = password.chars().count() >= self.min_chars;
        let letter_ok = !self.require_letter || password.chars().any(char::is_alphabetic);
        let digit_ok = !self.require_digit || password.chars().any(|c| c.is_ascii_digit());

        if long_enough && letter_ok && digit_ok {
            Ok(())
        } else {
            Err(AuthError::WeakPassword)
        }
    }
}

/// PHC-encoded argon2 hash of an account password that passed the policy
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    validate_password_strength(password)?;

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHashError(e.to_string()))
}

/// `Ok(false)` on a mismatch; a stored hash that cannot be parsed is an error
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| AuthError::PasswordHashError(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswordHashError(e.to_string())),
    }
}

pub fn validate_password_strength(password: &str) -> Result<(), AuthError> {
    PasswordPolicy::ACCOUNT.check(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("reader42").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("reader42", &hash).unwrap());
        assert!(!verify_password("reader43", &hash).unwrap());
    }

    #[test]
    fn test_only_policy_passing_passwords_are_hashed() {
        assert!(matches!(hash_password("short1"), Ok(_)));
        assert!(matches!(hash_password("abc12"), Err(AuthError::WeakPassword)));
    }

    #[test]
    fn test_account_policy() {
        assert!(validate_password_strength("book12").is_ok());
        assert!(validate_password_strength("LongerPassword9").is_ok());

        for weak in ["bk1", "bookworm", "123456", ""] {
            assert!(
                matches!(validate_password_strength(weak), Err(AuthError::WeakPassword)),
                "{weak:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_relaxed_policy() {
        let pin_only = PasswordPolicy {
            min_chars: 4,
            require_letter: false,
            require_digit: true,
        };
        assert!(pin_only.check("1234").is_ok());
        assert!(pin_only.check("abcd").is_err());
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(matches!(
            verify_password("book12", "not-a-phc-string"),
            Err(AuthError::PasswordHashError(_))
        ));
    }
}
