//! Expense CLI commands
//!
//! Implements add, list, delete and summary on top of the expense session.

use chrono::{Local, NaiveDate, Utc};
use clap::Args;

use crate::display::{format_expense_details, format_expense_list, format_summary};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseCategory, ExpenseDraft, Money};
use crate::reports::WeekStart;
use crate::services::{CategoryFilter, SortKey};

use super::AppContext;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount spent (e.g., "12.50")
    #[arg(allow_hyphen_values = true)]
    pub amount: String,

    /// What the money was spent on
    pub description: String,

    /// Category (food, travel, shopping, utilities, entertainment, health, other)
    #[arg(short, long, default_value = "food")]
    pub category: ExpenseCategory,

    /// Date of the expense (YYYY-MM-DD, default: today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show one category, or "all"
    #[arg(short, long, default_value = "all")]
    pub category: CategoryFilter,

    /// Sort by date, amount or category
    #[arg(short, long, default_value = "date")]
    pub sort: SortKey,

    /// Maximum number of expenses to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for `delete`
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Expense ID, full or short (e.g., "exp-1a2b3c4d")
    pub id: String,
}

/// Arguments for `summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Summarize as of this day (YYYY-MM-DD, default: today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// First day of the week, overriding the configured one
    #[arg(long)]
    pub week_start: Option<WeekStart>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Record a new expense
pub fn handle_add_command(ctx: &AppContext, args: AddArgs) -> ExpenseResult<()> {
    let amount = Money::parse(&args.amount).map_err(|e| ExpenseError::Validation(e.to_string()))?;
    let date = args.date.unwrap_or_else(today);
    let draft = ExpenseDraft::new(amount, args.category, args.description, date);

    let mut session = ctx.expense_session()?;
    let expense = session.add(draft, Utc::now())?;

    println!("Added expense {}", expense.id.short());
    println!();
    print!("{}", format_expense_details(&expense, &ctx.display_options()));

    Ok(())
}

/// List expenses with a filter and sort order
pub fn handle_list_command(ctx: &AppContext, args: ListArgs) -> ExpenseResult<()> {
    let session = ctx.expense_session()?;
    let mut expenses = session.view(args.category, args.sort);

    if let Some(limit) = args.limit {
        expenses.truncate(limit);
    }

    print!("{}", format_expense_list(&expenses, &ctx.display_options()));
    Ok(())
}

/// Delete an expense by full or short ID
pub fn handle_delete_command(ctx: &AppContext, args: DeleteArgs) -> ExpenseResult<()> {
    let mut session = ctx.expense_session()?;
    let id = session.resolve(&args.id)?.id;
    let removed = session.delete(id)?;

    println!(
        "Deleted expense {}: {} ({})",
        removed.id.short(),
        removed.description,
        ctx.display_options().money(removed.amount)
    );
    Ok(())
}

/// Show windowed totals and the category breakdown
pub fn handle_summary_command(ctx: &AppContext, args: SummaryArgs) -> ExpenseResult<()> {
    let session = ctx.expense_session()?;
    let day = args.date.unwrap_or_else(today);
    let week_start = args.week_start.unwrap_or(ctx.settings.week_start);

    let summary = session.summary(day, week_start);
    print!("{}", format_summary(&summary, day, &ctx.display_options()));
    Ok(())
}
