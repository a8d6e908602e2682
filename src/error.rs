//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for drafts and user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A store was called without an authenticated owner
    #[error("Not authenticated: sign in to continue")]
    NotAuthenticated,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Unknown username or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Password hashing and session errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite errors
    #[error("Database error: {0}")]
    Database(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ExpenseError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for usernames
    pub fn username_taken(username: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "User",
            identifier: username.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error means the caller has no owner context
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for ExpenseError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpenseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = ExpenseError::expense_not_found("exp-1234abcd");
        assert_eq!(err.to_string(), "Expense not found: exp-1234abcd");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_duplicate_username() {
        let err = ExpenseError::username_taken("alice");
        assert_eq!(err.to_string(), "User already exists: alice");
    }

    #[test]
    fn test_not_authenticated() {
        let err = ExpenseError::NotAuthenticated;
        assert!(err.is_not_authenticated());
        assert_eq!(err.to_string(), "Not authenticated: sign in to continue");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpenseError = io_err.into();
        assert!(matches!(err, ExpenseError::Io(_)));
    }

    #[test]
    fn test_from_sqlite_error() {
        let err: ExpenseError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, ExpenseError::Database(_)));
    }
}
