//! JSON export
//!
//! Writes the owner's expenses together with the summary computed for the
//! export day, under a schema version.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;
use crate::reports::ExpenseSummary;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A complete export document
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Username for the database backend; absent for local data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    pub expenses: Vec<Expense>,

    pub summary: ExpenseSummary,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub expense_count: usize,

    /// Earliest expense date
    pub earliest_expense: Option<String>,

    /// Latest expense date
    pub latest_expense: Option<String>,
}

impl ExpenseExport {
    pub fn new(
        expenses: Vec<Expense>,
        summary: ExpenseSummary,
        owner: Option<String>,
        exported_at: DateTime<Utc>,
    ) -> Self {
        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            owner,
            expenses,
            summary,
            metadata,
        }
    }
}

/// Write the export as pretty-printed JSON
pub fn export_json<W: Write>(export: &ExpenseExport, writer: &mut W) -> ExpenseResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}
