//! Account sign-up, sign-in and the persisted session
//!
//! Passwords are stored as Argon2id PHC strings. The signed-in session is
//! written to `session.json` so later commands run as the same user.

use std::path::PathBuf;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{validate_password, validate_username, Session, User, UserId};
use crate::storage::file_io::{read_json_required, remove_if_exists, write_json_atomic};
use crate::storage::UserDirectory;

/// What the audit log records about a new account
#[derive(Serialize)]
struct AccountRecord<'a> {
    id: UserId,
    username: &'a str,
    created_at: DateTime<Utc>,
}

/// Service for account management
pub struct AuthService<'a> {
    users: &'a dyn UserDirectory,
    session_file: PathBuf,
    audit: Option<&'a AuditLogger>,
}

impl<'a> AuthService<'a> {
    pub fn new(users: &'a dyn UserDirectory, session_file: PathBuf) -> Self {
        Self {
            users,
            session_file,
            audit: None,
        }
    }

    /// Record sign-ups in `logger`
    pub fn with_audit(mut self, logger: &'a AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Register a new account and sign it in
    pub fn sign_up(&self, username: &str, password: &str, now: DateTime<Utc>) -> ExpenseResult<Session> {
        let username = username.trim();
        validate_username(username).map_err(ExpenseError::Validation)?;
        validate_password(password).map_err(ExpenseError::Validation)?;

        if self.users.find_user(username)?.is_some() {
            return Err(ExpenseError::username_taken(username));
        }

        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            password_hash: hash_password(password)?,
            created_at: now,
        };
        self.users.insert_user(&user)?;

        if let Some(logger) = self.audit {
            let record = AccountRecord {
                id: user.id,
                username: &user.username,
                created_at: user.created_at,
            };
            logger.log(
                &AuditEntry::create(
                    EntityType::User,
                    user.id.to_string(),
                    Some(user.id),
                    Some(user.username.clone()),
                    &record,
                )
                .at(now),
            )?;
        }

        self.start_session(&user, now)
    }

    /// Check credentials and persist a new session
    ///
    /// Unknown usernames and wrong passwords fail the same way.
    pub fn sign_in(&self, username: &str, password: &str, now: DateTime<Utc>) -> ExpenseResult<Session> {
        let user = self
            .users
            .find_user(username.trim())?
            .ok_or(ExpenseError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(ExpenseError::InvalidCredentials);
        }

        self.start_session(&user, now)
    }

    /// Forget the persisted session; returns whether one existed
    pub fn sign_out(&self) -> ExpenseResult<bool> {
        remove_if_exists(&self.session_file)
    }

    /// The persisted session, if someone is signed in
    pub fn current(&self) -> ExpenseResult<Option<Session>> {
        if !self.session_file.exists() {
            return Ok(None);
        }
        read_json_required(&self.session_file).map(Some)
    }

    fn start_session(&self, user: &User, now: DateTime<Utc>) -> ExpenseResult<Session> {
        let session = Session::for_user(user, now);
        write_json_atomic(&self.session_file, &session)?;
        Ok(session)
    }
}

fn hash_password(password: &str) -> ExpenseResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ExpenseError::Auth(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, stored: &str) -> ExpenseResult<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| ExpenseError::Auth(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::storage::DatabaseStore;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap()
    }

    fn setup() -> (TempDir, DatabaseStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = DatabaseStore::open_in_memory().unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_sign_up_signs_in() {
        let (temp, store) = setup();
        let auth = AuthService::new(&store, temp.path().join("session.json"));

        let session = auth.sign_up("alice", "hunter22", now()).unwrap();
        assert_eq!(session.username, "alice");
        assert_eq!(auth.current().unwrap(), Some(session.clone()));

        let user = store.find_user("alice").unwrap().unwrap();
        assert_eq!(user.id, session.user_id);
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert_ne!(user.password_hash, "hunter22");
    }

    #[test]
    fn test_duplicate_sign_up() {
        let (temp, store) = setup();
        let auth = AuthService::new(&store, temp.path().join("session.json"));
        auth.sign_up("alice", "hunter22", now()).unwrap();

        let err = auth.sign_up("ALICE", "another1", now()).unwrap_err();
        assert!(matches!(err, ExpenseError::Duplicate { .. }));
    }

    #[test]
    fn test_sign_up_validation() {
        let (temp, store) = setup();
        let auth = AuthService::new(&store, temp.path().join("session.json"));

        assert!(auth.sign_up("al", "hunter22", now()).unwrap_err().is_validation());
        assert!(auth.sign_up("alice", "short", now()).unwrap_err().is_validation());
        assert!(auth.current().unwrap().is_none());
    }

    #[test]
    fn test_sign_in_errors_are_indistinguishable() {
        let (temp, store) = setup();
        let auth = AuthService::new(&store, temp.path().join("session.json"));
        auth.sign_up("alice", "hunter22", now()).unwrap();
        auth.sign_out().unwrap();

        let wrong_password = auth.sign_in("alice", "wrong-pw", now()).unwrap_err();
        let unknown_user = auth.sign_in("mallory", "hunter22", now()).unwrap_err();

        assert!(matches!(wrong_password, ExpenseError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(auth.current().unwrap().is_none());
    }

    #[test]
    fn test_sign_in_and_out() {
        let (temp, store) = setup();
        let auth = AuthService::new(&store, temp.path().join("session.json"));
        let created = auth.sign_up("alice", "hunter22", now()).unwrap();
        assert!(auth.sign_out().unwrap());

        let session = auth.sign_in("alice", "hunter22", now()).unwrap();
        assert_eq!(session.user_id, created.user_id);

        assert!(auth.sign_out().unwrap());
        assert!(!auth.sign_out().unwrap());
        assert!(auth.current().unwrap().is_none());
    }

    #[test]
    fn test_sign_up_is_audited_without_hash() {
        let (temp, store) = setup();
        let logger = AuditLogger::new(temp.path().join("audit.log"));
        let auth = AuthService::new(&store, temp.path().join("session.json")).with_audit(&logger);
        auth.sign_up("alice", "hunter22", now()).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::User);

        let after = entries[0].after.as_ref().unwrap().to_string();
        assert!(after.contains("alice"));
        assert!(!after.contains("argon2"));
    }
}
