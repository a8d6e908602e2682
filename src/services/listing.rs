//! Filtered and sorted views of the expense list

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseCategory, Money};

/// Category selector for list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Every record passes
    #[default]
    All,
    /// Only records in this category
    Only(ExpenseCategory),
}

impl CategoryFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => expense.category == *category,
        }
    }
}

impl From<ExpenseCategory> for CategoryFilter {
    fn from(category: ExpenseCategory) -> Self {
        Self::Only(category)
    }
}

impl FromStr for CategoryFilter {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<ExpenseCategory>()
            .map(Self::Only)
            .map_err(|e| ExpenseError::Validation(e.to_string()))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(category) => write!(f, "{}", category),
        }
    }
}

/// Sort order for list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recent date first
    #[default]
    Date,
    /// Largest amount first
    Amount,
    /// Category identifier, A to Z
    Category,
}

impl SortKey {
    fn compare(&self, a: &Expense, b: &Expense) -> Ordering {
        match self {
            Self::Date => b.date.cmp(&a.date),
            Self::Amount => b.amount.cmp(&a.amount),
            Self::Category => a.category.as_str().cmp(b.category.as_str()),
        }
    }
}

impl FromStr for SortKey {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "category" => Ok(Self::Category),
            other => Err(ExpenseError::Validation(format!(
                "Unknown sort key '{}'. Use date, amount or category",
                other
            ))),
        }
    }
}

/// Filter then sort, leaving `records` untouched
///
/// The sort is stable: records with equal keys keep their input order.
pub fn filter_and_sort(records: &[Expense], filter: CategoryFilter, sort: SortKey) -> Vec<Expense> {
    let mut view: Vec<Expense> = records
        .iter()
        .filter(|expense| filter.matches(expense))
        .cloned()
        .collect();
    view.sort_by(|a, b| sort.compare(a, b));
    view
}

/// Sum of all amounts in `records`
pub fn total(records: &[Expense]) -> Money {
    records.iter().map(|e| e.amount).sum()
}
