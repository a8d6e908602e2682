//! User accounts and authenticated sessions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Minimum and maximum username length
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 32;

/// Minimum password length
pub const PASSWORD_MIN_LEN: usize = 6;

/// A registered account in the database backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Argon2id PHC string
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The authenticated owner context passed to store calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn for_user(user: &User, signed_in_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            signed_in_at,
        }
    }
}

/// Check that a username is usable
///
/// Usernames are 3-32 characters of ASCII letters, digits, `_`, `.` or `-`.
pub fn validate_username(username: &str) -> Result<(), String> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(format!(
            "Username must be {}-{} characters",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        ));
    }

    if let Some(bad) = username
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
    {
        return Err(format!("Username contains invalid character '{}'", bad));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LEN
        ));
    }
    Ok(())
}
