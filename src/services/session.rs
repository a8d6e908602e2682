//! Expense session state
//!
//! Holds one owner's expense list as an immutable snapshot. Mutations go to
//! the store first; only after the store succeeds is the snapshot replaced
//! with a new collection, so a reader holding an older `Arc` never sees a
//! half-applied change.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseDraft, ExpenseId, UserId};
use crate::reports::{ExpenseSummary, WeekStart};
use crate::storage::ExpenseStore;

use super::listing::{filter_and_sort, CategoryFilter, SortKey};

/// One owner's view of their expenses
pub struct ExpenseSession<'a, S: ExpenseStore + ?Sized + 'a = dyn ExpenseStore + 'a> {
    store: &'a S,
    owner: Option<UserId>,
    audit: Option<&'a AuditLogger>,
    expenses: Arc<Vec<Expense>>,
}

impl<'a, S: ExpenseStore + ?Sized + 'a> ExpenseSession<'a, S> {
    /// Create an empty session; call [`load`](Self::load) to populate it
    pub fn new(store: &'a S, owner: Option<UserId>) -> Self {
        Self {
            store,
            owner,
            audit: None,
            expenses: Arc::new(Vec::new()),
        }
    }

    /// Record every add and delete in `logger`
    pub fn with_audit(mut self, logger: &'a AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn owner(&self) -> Option<UserId> {
        self.owner
    }

    /// The current snapshot
    pub fn expenses(&self) -> Arc<Vec<Expense>> {
        Arc::clone(&self.expenses)
    }

    /// Replace the snapshot with the owner's stored expenses
    pub fn load(&mut self) -> ExpenseResult<Arc<Vec<Expense>>> {
        let expenses = self.store.list(self.owner)?;
        self.expenses = Arc::new(expenses);
        Ok(self.expenses())
    }

    /// Persist a draft and prepend the stored expense to the snapshot
    pub fn add(&mut self, draft: ExpenseDraft, now: DateTime<Utc>) -> ExpenseResult<Expense> {
        let expense = self.store.add(self.owner, draft, now)?;

        let mut next = Vec::with_capacity(self.expenses.len() + 1);
        next.push(expense.clone());
        next.extend(self.expenses.iter().cloned());
        self.expenses = Arc::new(next);

        if let Some(logger) = self.audit {
            logger.log(
                &AuditEntry::create(
                    EntityType::Expense,
                    expense.id.to_string(),
                    self.owner,
                    Some(expense.description.clone()),
                    &expense,
                )
                .at(now),
            )?;
        }

        Ok(expense)
    }

    /// Delete an expense from the store and drop it from the snapshot
    pub fn delete(&mut self, id: ExpenseId) -> ExpenseResult<Expense> {
        let removed = self.store.delete(self.owner, id)?;

        let next: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.expenses = Arc::new(next);

        if let Some(logger) = self.audit {
            logger.log(&AuditEntry::delete(
                EntityType::Expense,
                removed.id.to_string(),
                self.owner,
                Some(removed.description.clone()),
                &removed,
            ))?;
        }

        Ok(removed)
    }

    /// Find an expense in the snapshot by full id or short prefix
    ///
    /// `NotFound` when nothing matches; a prefix shared by several expenses
    /// is a validation error.
    pub fn resolve(&self, reference: &str) -> ExpenseResult<&Expense> {
        let matches: Vec<&Expense> = self
            .expenses
            .iter()
            .filter(|e| e.id.matches_reference(reference))
            .collect();

        match matches.as_slice() {
            [] => Err(ExpenseError::expense_not_found(reference)),
            [expense] => Ok(*expense),
            _ => Err(ExpenseError::Validation(format!(
                "'{}' matches {} expenses; use more characters of the ID",
                reference,
                matches.len()
            ))),
        }
    }

    /// Totals over the current snapshot
    pub fn summary(&self, today: NaiveDate, week_start: WeekStart) -> ExpenseSummary {
        ExpenseSummary::compute(&self.expenses, today, week_start)
    }

    /// Filtered, sorted copy of the current snapshot
    pub fn view(&self, filter: CategoryFilter, sort: SortKey) -> Vec<Expense> {
        filter_and_sort(&self.expenses, filter, sort)
    }
}
