//! Local JSON expense store
//!
//! Keeps every record in `expenses.json`, cached in memory behind a lock and
//! rewritten atomically after each mutation.

use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseDraft, ExpenseId, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::{build_expense, require_owner, ExpenseStore};

/// One record on disk, tagged with its owner
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredExpense {
    owner_id: UserId,
    #[serde(flatten)]
    expense: Expense,
}

/// Serializable file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExpenseData {
    expenses: Vec<StoredExpense>,
}

/// File-backed store, newest records first
pub struct LocalStore {
    path: PathBuf,
    data: RwLock<Vec<StoredExpense>>,
}

impl LocalStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load records from disk, replacing the cache
    pub fn load(&self) -> ExpenseResult<()> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.expenses;
        data.sort_by(|a, b| b.expense.created_at.cmp(&a.expense.created_at));

        Ok(())
    }

    fn save(&self, records: &[StoredExpense]) -> ExpenseResult<()> {
        let file_data = ExpenseData {
            expenses: records.to_vec(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Number of records across all owners
    pub fn count(&self) -> ExpenseResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}

impl ExpenseStore for LocalStore {
    fn list(&self, owner: Option<UserId>) -> ExpenseResult<Vec<Expense>> {
        let owner = require_owner(owner)?;
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .iter()
            .filter(|record| record.owner_id == owner)
            .map(|record| record.expense.clone())
            .collect())
    }

    fn add(
        &self,
        owner: Option<UserId>,
        draft: ExpenseDraft,
        created_at: DateTime<Utc>,
    ) -> ExpenseResult<Expense> {
        let owner = require_owner(owner)?;
        let expense = build_expense(draft, created_at)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Persist first so a failed write leaves the cache untouched
        let mut updated = Vec::with_capacity(data.len() + 1);
        updated.push(StoredExpense {
            owner_id: owner,
            expense: expense.clone(),
        });
        updated.extend(data.iter().cloned());
        self.save(&updated)?;
        *data = updated;

        Ok(expense)
    }

    fn delete(&self, owner: Option<UserId>, id: ExpenseId) -> ExpenseResult<Expense> {
        let owner = require_owner(owner)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let position = data
            .iter()
            .position(|record| record.expense.id == id && record.owner_id == owner)
            .ok_or_else(|| ExpenseError::expense_not_found(id.short()))?;

        let mut updated = data.clone();
        let removed = updated.remove(position);
        self.save(&updated)?;
        *data = updated;

        Ok(removed.expense)
    }
}
