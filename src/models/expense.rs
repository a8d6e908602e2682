//! Expense model
//!
//! An expense is one discrete spending event. Expenses are immutable once
//! created; the only lifecycle change is deletion.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::ExpenseId;
use super::money::Money;

/// Largest amount a single expense may record ($1 billion)
///
/// Keeps totals over millions of expenses well inside `i64` cents.
pub const MAX_EXPENSE_AMOUNT: Money = Money::from_cents(100_000_000_000);

/// A proposed expense before the store assigns an id and timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub amount: Money,
    pub category: ExpenseCategory,
    pub description: String,
    pub date: NaiveDate,
}

impl ExpenseDraft {
    pub fn new(
        amount: Money,
        category: ExpenseCategory,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            category,
            description: description.into(),
            date,
        }
    }

    /// Validate the draft
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }

        if self.amount > MAX_EXPENSE_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        Ok(())
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount spent, never negative
    pub amount: Money,

    pub category: ExpenseCategory,

    /// Free-text label, stored trimmed
    pub description: String,

    /// Calendar day the expense occurred
    pub date: NaiveDate,

    /// When the record was inserted
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Build an expense from a validated draft
    ///
    /// The description is trimmed; the id is freshly generated.
    pub fn from_draft(
        draft: ExpenseDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ExpenseValidationError> {
        draft.validate()?;

        Ok(Self {
            id: ExpenseId::new(),
            amount: draft.amount,
            category: draft.category,
            description: draft.description.trim().to_string(),
            date: draft.date,
            created_at,
        })
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.description,
            self.amount
        )
    }
}

/// Validation errors for expense drafts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Money),
    #[error("Amount exceeds the maximum of {max}: {0}", max = MAX_EXPENSE_AMOUNT)]
    AmountTooLarge(Money),
    #[error("Description cannot be empty")]
    EmptyDescription,
}
