//! Expense category registry
//!
//! Categories form a fixed, closed set. Each one carries the label, color
//! token and icon used when rendering lists and breakdowns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A spending classification
///
/// Serialized as its lowercase identifier (`"food"`, `"travel"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    #[default]
    Food,
    Travel,
    Shopping,
    Utilities,
    Entertainment,
    Health,
    Other,
}

impl ExpenseCategory {
    /// Every category, in registry order
    pub const ALL: [ExpenseCategory; 7] = [
        Self::Food,
        Self::Travel,
        Self::Shopping,
        Self::Utilities,
        Self::Entertainment,
        Self::Health,
        Self::Other,
    ];

    /// Stable identifier, also the serialized form
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Travel => "travel",
            Self::Shopping => "shopping",
            Self::Utilities => "utilities",
            Self::Entertainment => "entertainment",
            Self::Health => "health",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food & Dining",
            Self::Travel => "Travel",
            Self::Shopping => "Shopping",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health & Fitness",
            Self::Other => "Other",
        }
    }

    /// Color token for themed renderers
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Food => "category-food",
            Self::Travel => "category-travel",
            Self::Shopping => "category-shopping",
            Self::Utilities => "category-utilities",
            Self::Entertainment => "category-entertainment",
            Self::Health => "category-health",
            Self::Other => "category-other",
        }
    }

    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Food => "🍽️",
            Self::Travel => "✈️",
            Self::Shopping => "🛍️",
            Self::Utilities => "⚡",
            Self::Entertainment => "🎬",
            Self::Health => "💊",
            Self::Other => "📦",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a string names no registered category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category '{0}'. Expected one of: food, travel, shopping, utilities, entertainment, health, other")]
pub struct UnknownCategory(pub String);

impl FromStr for ExpenseCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_complete() {
        assert_eq!(ExpenseCategory::ALL.len(), 7);
        for category in ExpenseCategory::ALL {
            assert!(!category.label().is_empty());
            assert!(category.color().starts_with("category-"));
            assert!(category.color().ends_with(category.as_str()));
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("food".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Food);
        assert_eq!(" Travel ".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Travel);
        assert_eq!("HEALTH".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Health);
        assert!("groceries".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn test_display_matches_identifier() {
        for category in ExpenseCategory::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&ExpenseCategory::Entertainment).unwrap();
        assert_eq!(json, "\"entertainment\"");
        let back: ExpenseCategory = serde_json::from_str("\"utilities\"").unwrap();
        assert_eq!(back, ExpenseCategory::Utilities);
        assert!(serde_json::from_str::<ExpenseCategory>("\"rent\"").is_err());
    }
}
