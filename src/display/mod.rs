//! Display formatting for terminal output
//!
//! Renders expenses, summaries and the category registry as plain text and
//! tables. Nothing here reads storage; callers pass in what to show.

pub mod category;
pub mod expense;
pub mod summary;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

pub use category::format_category_registry;
pub use expense::{format_expense_details, format_expense_list};
pub use summary::{format_category_breakdown, format_summary};

/// Currency and date preferences for rendering
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl From<&crate::config::Settings> for DisplayOptions {
    fn from(settings: &crate::config::Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }
}

impl DisplayOptions {
    /// Format a date, falling back to ISO when the configured format is invalid
    pub fn date(&self, date: NaiveDate) -> String {
        let valid = !StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
        if valid {
            date.format(&self.date_format).to_string()
        } else {
            date.format("%Y-%m-%d").to_string()
        }
    }

    pub fn money(&self, amount: crate::models::Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}

/// Shorten `s` to at most `max` characters, marking the cut with `...`
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_format_falls_back() {
        let options = DisplayOptions {
            date_format: "%Q bad".to_string(),
            ..Default::default()
        };
        let day = NaiveDate::from_ymd_opt(2025, 3, 19).unwrap();
        assert_eq!(options.date(day), "2025-03-19");
    }

    #[test]
    fn test_custom_date_format() {
        let options = DisplayOptions {
            date_format: "%d/%m/%Y".to_string(),
            ..Default::default()
        };
        let day = NaiveDate::from_ymd_opt(2025, 3, 19).unwrap();
        assert_eq!(options.date(day), "19/03/2025");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Lunch", 10), "Lunch");
        assert_eq!(truncate("A very long description", 10), "A very ...");
    }
}
