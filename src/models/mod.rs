//! Core data models for the expense tracker
//!
//! This module contains the data structures of the expense domain:
//! categories, money amounts, expenses, users and sessions.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod user;

pub use category::{ExpenseCategory, UnknownCategory};
pub use expense::{Expense, ExpenseDraft, ExpenseValidationError, MAX_EXPENSE_AMOUNT};
pub use ids::{ExpenseId, UserId};
pub use money::{Money, MoneyParseError};
pub use user::{validate_password, validate_username, Session, User};
