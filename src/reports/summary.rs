//! Spending summary
//!
//! Computes today / week / month / all-time totals and per-category sums
//! from an in-memory collection of expenses. Everything here is a pure
//! function of its inputs; the current day is always a parameter.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseCategory, Money};

/// First day of the week for the weekly window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Weekday index 0 = Sunday
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Days elapsed since the start of the week containing `date`
    fn days_into_week(&self, date: NaiveDate) -> i64 {
        let weekday = date.weekday();
        match self {
            Self::Sunday => i64::from(weekday.num_days_from_sunday()),
            Self::Monday => i64::from(weekday.num_days_from_monday()),
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sunday => write!(f, "sunday"),
            Self::Monday => write!(f, "monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Self::Sunday),
            "monday" | "mon" => Ok(Self::Monday),
            other => Err(ExpenseError::Validation(format!(
                "Unknown week start '{}'. Use 'sunday' or 'monday'",
                other
            ))),
        }
    }
}

/// The calendar boundaries of each window for a given day
///
/// All windows end at `today` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryWindows {
    pub today: NaiveDate,
    pub week_start: NaiveDate,
    pub month_start: NaiveDate,
}

impl SummaryWindows {
    pub fn for_day(today: NaiveDate, week_start: WeekStart) -> Self {
        Self {
            today,
            week_start: today - Duration::days(week_start.days_into_week(today)),
            month_start: today - Duration::days(i64::from(today.day0())),
        }
    }

    pub fn in_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }

    pub fn in_week(&self, date: NaiveDate) -> bool {
        self.week_start <= date && date <= self.today
    }

    pub fn in_month(&self, date: NaiveDate) -> bool {
        self.month_start <= date && date <= self.today
    }
}

/// Aggregated spending totals
///
/// Recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExpenseSummary {
    pub total_today: Money,
    pub total_week: Money,
    pub total_month: Money,
    pub total_all: Money,
    /// Sum per category; categories with no expenses are absent
    pub category_summary: BTreeMap<ExpenseCategory, Money>,
}

/// One slice of the category breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub amount: Money,
    /// Percentage of the all-time total
    pub percentage: f64,
}

impl ExpenseSummary {
    /// Summarize `expenses` as seen on the calendar day `today`
    pub fn compute(expenses: &[Expense], today: NaiveDate, week_start: WeekStart) -> Self {
        let windows = SummaryWindows::for_day(today, week_start);
        let mut summary = Self::default();

        for expense in expenses {
            if windows.in_today(expense.date) {
                summary.total_today += expense.amount;
            }
            if windows.in_week(expense.date) {
                summary.total_week += expense.amount;
            }
            if windows.in_month(expense.date) {
                summary.total_month += expense.amount;
            }
            summary.total_all += expense.amount;

            if !expense.amount.is_zero() {
                *summary
                    .category_summary
                    .entry(expense.category)
                    .or_insert_with(Money::zero) += expense.amount;
            }
        }

        summary
    }

    /// Summarize as of the instant `now`, truncated to its calendar day in
    /// `now`'s own time zone
    ///
    /// Pass `chrono::Local::now()` for the user's local day.
    pub fn at<Tz: TimeZone>(expenses: &[Expense], now: &DateTime<Tz>, week_start: WeekStart) -> Self {
        Self::compute(expenses, now.date_naive(), week_start)
    }

    /// Spend recorded for one category, zero if none
    pub fn category_total(&self, category: ExpenseCategory) -> Money {
        self.category_summary
            .get(&category)
            .copied()
            .unwrap_or_default()
    }

    /// Check if nothing has been spent
    pub fn is_empty(&self) -> bool {
        self.category_summary.is_empty() && self.total_all.is_zero()
    }

    /// Categories with spend, largest first, with their share of the total
    ///
    /// Equal amounts keep registry order.
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        let mut shares: Vec<CategoryShare> = self
            .category_summary
            .iter()
            .map(|(&category, &amount)| CategoryShare {
                category,
                amount,
                percentage: amount.percentage_of(self.total_all),
            })
            .collect();

        shares.sort_by(|a, b| b.amount.cmp(&a.amount));
        shares
    }
}
