//! Storage layer for the expense tracker
//!
//! Expenses are persisted through the [`ExpenseStore`] trait. Two
//! implementations exist and are chosen when the application starts:
//!
//! - [`LocalStore`]: a JSON file for the single implicit local user
//! - [`DatabaseStore`]: SQLite with user accounts and per-user scoping
//!
//! Every call carries the owner explicitly. `None` means nobody is signed
//! in and is rejected with `NotAuthenticated`. Records belonging to another
//! owner behave exactly like records that do not exist.

pub mod database;
pub mod file_io;
pub mod local;

pub use database::DatabaseStore;
pub use file_io::{read_json, write_json_atomic};
pub use local::LocalStore;

use chrono::{DateTime, Utc};

use crate::config::{ExpensePaths, StorageBackend};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseDraft, ExpenseId, User, UserId};

/// CRUD over one owner's expense records
pub trait ExpenseStore: Send + Sync {
    /// All of the owner's expenses, newest `created_at` first
    fn list(&self, owner: Option<UserId>) -> ExpenseResult<Vec<Expense>>;

    /// Validate and persist a draft, assigning its id and `created_at`
    fn add(
        &self,
        owner: Option<UserId>,
        draft: ExpenseDraft,
        created_at: DateTime<Utc>,
    ) -> ExpenseResult<Expense>;

    /// Delete one of the owner's expenses and return it
    fn delete(&self, owner: Option<UserId>, id: ExpenseId) -> ExpenseResult<Expense>;
}

/// Account lookup and registration for backends that support sign-in
pub trait UserDirectory {
    fn find_user(&self, username: &str) -> ExpenseResult<Option<User>>;

    /// Insert a new user; `Duplicate` if the username is taken
    fn insert_user(&self, user: &User) -> ExpenseResult<()>;
}

/// Resolve the owner context or fail with `NotAuthenticated`
pub(crate) fn require_owner(owner: Option<UserId>) -> ExpenseResult<UserId> {
    owner.ok_or(ExpenseError::NotAuthenticated)
}

/// Turn a draft into a record, mapping validation failures
pub(crate) fn build_expense(draft: ExpenseDraft, created_at: DateTime<Utc>) -> ExpenseResult<Expense> {
    Expense::from_draft(draft, created_at).map_err(|e| ExpenseError::Validation(e.to_string()))
}

/// The configured store, opened from its default location
pub enum Backend {
    Local(LocalStore),
    Database(DatabaseStore),
}

impl Backend {
    /// Open the store for `backend` under `paths`
    pub fn open(backend: StorageBackend, paths: &ExpensePaths) -> ExpenseResult<Self> {
        paths.ensure_directories()?;
        match backend {
            StorageBackend::Local => {
                let store = LocalStore::new(paths.expenses_file());
                store.load()?;
                Ok(Self::Local(store))
            }
            StorageBackend::Database => Ok(Self::Database(DatabaseStore::open(
                paths.database_file(),
            )?)),
        }
    }

    pub fn store(&self) -> &dyn ExpenseStore {
        match self {
            Self::Local(store) => store,
            Self::Database(store) => store,
        }
    }

    /// The account directory, if this backend has accounts
    pub fn users(&self) -> Option<&dyn UserDirectory> {
        match self {
            Self::Local(_) => None,
            Self::Database(store) => Some(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_local_backend() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let backend = Backend::open(StorageBackend::Local, &paths).unwrap();
        assert!(backend.users().is_none());
        assert!(backend.store().list(Some(UserId::local())).unwrap().is_empty());
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_open_database_backend() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let backend = Backend::open(StorageBackend::Database, &paths).unwrap();
        assert!(backend.users().is_some());
        assert!(paths.database_file().exists());
    }

    #[test]
    fn test_require_owner() {
        assert!(matches!(require_owner(None), Err(ExpenseError::NotAuthenticated)));
        assert_eq!(require_owner(Some(UserId::local())).unwrap(), UserId::local());
    }
}
