//! CSV export
//!
//! One row per expense with amounts as plain decimals, so the file opens
//! cleanly in a spreadsheet.

use std::io::Write;

use serde::Serialize;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

#[derive(Serialize)]
struct ExpenseRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Created At")]
    created_at: String,
}

impl<'a> From<&'a Expense> for ExpenseRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            category: expense.category.as_str(),
            description: &expense.description,
            amount: expense.amount.to_decimal_string(),
            created_at: expense.created_at.to_rfc3339(),
        }
    }
}

/// Write expenses to CSV in the order given
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpenseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if expenses.is_empty() {
        csv_writer
            .write_record(["ID", "Date", "Category", "Description", "Amount", "Created At"])
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    for expense in expenses {
        csv_writer
            .serialize(ExpenseRow::from(expense))
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
