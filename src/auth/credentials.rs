//! Password hashing and the input rules for usernames, passwords and emails.

use bcrypt::{DEFAULT_COST, hash, verify};

pub const USERNAME_MIN_LEN: usize = 4;
pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const EMAIL_MAX_LEN: usize = 120;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(bcrypt::BcryptError),
    #[error("Password verification failed: {0}")]
    VerificationFailed(bcrypt::BcryptError),
}

pub struct PasswordManager;

impl PasswordManager {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        hash(password, DEFAULT_COST).map_err(PasswordError::HashingFailed)
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        verify(password, hash).map_err(PasswordError::VerificationFailed)
    }
}

/// Why a username cannot be used, worded for the end user.
pub fn username_problem(username: &str) -> Option<&'static str> {
    if username.is_empty() {
        Some("Username is required")
    } else if username.chars().count() < USERNAME_MIN_LEN {
        Some("Username must be at least 4 characters")
    } else if username.chars().count() > USERNAME_MAX_LEN {
        Some("Username is too long")
    } else if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some("Username may only contain letters and digits")
    } else {
        None
    }
}

pub fn password_problem(password: &str, confirmation: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some("Password is required")
    } else if password.chars().count() < PASSWORD_MIN_LEN {
        Some("Password must be at least 8 characters")
    } else if password != confirmation {
        Some("Passwords do not match")
    } else {
        None
    }
}

/// Loose shape check: one `@`, a non-empty local part and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > EMAIL_MAX_LEN || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(name, tld)| !name.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}
