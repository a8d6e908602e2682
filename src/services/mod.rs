//! Service layer for the expense tracker
//!
//! Services sit between the CLI and the stores: they keep the in-memory
//! snapshot, apply filters and record every mutation in the audit log.

pub mod auth;
pub mod listing;
pub mod session;

pub use auth::AuthService;
pub use listing::{filter_and_sort, total, CategoryFilter, SortKey};
pub use session::ExpenseSession;
