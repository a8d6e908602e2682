//! Expense Tracker - personal spending summaries from the command line
//!
//! This library records discrete expenses (amount, category, description,
//! date) and computes spending totals for today, the current week, the
//! current month and all time, together with a per-category breakdown.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Expenses, categories, money, users and sessions
//! - `reports`: The spending summary
//! - `storage`: The `ExpenseStore` trait with JSON file and SQLite backends
//! - `services`: Expense session state, list views and accounts
//! - `audit`: Audit logging system
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expenses` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::reports::{ExpenseSummary, WeekStart};
//!
//! let summary = ExpenseSummary::compute(&expenses, today, WeekStart::Sunday);
//! println!("Spent today: {}", summary.total_today);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
