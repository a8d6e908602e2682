//! Reports module for the expense tracker
//!
//! Provides the spending summary: time-windowed totals and the
//! per-category breakdown.

pub mod summary;

pub use summary::{CategoryShare, ExpenseSummary, SummaryWindows, WeekStart};
