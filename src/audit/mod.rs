//! Audit logging for the expense tracker
//!
//! Every add, delete and sign-up is recorded in an append-only JSONL file,
//! one entry per line, with the affected record before or after the change.
//!
//! ```rust,ignore
//! use expense_tracker::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::Expense,
//!     expense.id.to_string(),
//!     Some(owner),
//!     Some(expense.description.clone()),
//!     &expense,
//! ))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
