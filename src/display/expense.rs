//! Expense list and detail formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::Expense;
use crate::services::total;

use super::{truncate, DisplayOptions};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table with a total line
pub fn format_expense_list(expenses: &[Expense], options: &DisplayOptions) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n\nRecord one with 'expenses add <amount> <description>'.\n"
            .to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.short(),
            date: options.date(e.date),
            category: format!("{} {}", e.category.icon(), e.category.label()),
            description: truncate(&e.description, 40),
            amount: options.money(e.amount),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    format!(
        "{}\n{} expense(s), total {}\n",
        table,
        expenses.len(),
        options.money(total(expenses))
    )
}

/// Format one expense in full
pub fn format_expense_details(expense: &Expense, options: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", options.date(expense.date)));
    output.push_str(&format!(
        "Category:    {} {}\n",
        expense.category.icon(),
        expense.category.label()
    ));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Amount:      {}\n", options.money(expense.amount)));
    output.push_str(&format!(
        "Recorded:    {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, ExpenseDraft, Money};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn expense(cents: i64, category: ExpenseCategory, description: &str) -> Expense {
        let draft = ExpenseDraft::new(
            Money::from_cents(cents),
            category,
            description,
            NaiveDate::from_ymd_opt(2025, 3, 19).unwrap(),
        );
        Expense::from_draft(draft, Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_list() {
        let output = format_expense_list(&[], &DisplayOptions::default());
        assert!(output.starts_with("No expenses found."));
    }

    #[test]
    fn test_list_contents() {
        let expenses = vec![
            expense(1250, ExpenseCategory::Food, "Lunch"),
            expense(4000, ExpenseCategory::Travel, "Train"),
        ];
        let output = format_expense_list(&expenses, &DisplayOptions::default());

        assert!(output.contains(&expenses[0].id.short()));
        assert!(output.contains("Food & Dining"));
        assert!(output.contains("$12.50"));
        assert!(output.contains("2 expense(s), total $52.50"));
    }

    #[test]
    fn test_details_use_currency_symbol() {
        let options = DisplayOptions {
            currency_symbol: "€".to_string(),
            ..Default::default()
        };
        let output = format_expense_details(&expense(999, ExpenseCategory::Health, "Vitamins"), &options);
        assert!(output.contains("Amount:      €9.99"));
        assert!(output.contains("Health & Fitness"));
    }
}
