//! User settings for the expense tracker
//!
//! Manages user preferences: which persistence backend to use, currency
//! display, and the first day of the week for weekly totals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::reports::WeekStart;
use crate::storage::file_io::{read_json_required, write_json_atomic};

/// Which persistence strategy to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Single-user JSON file, no sign-in
    #[default]
    Local,
    /// SQLite database with user accounts
    Database,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Database => write!(f, "database"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "database" | "db" => Ok(Self::Database),
            other => Err(ExpenseError::Config(format!(
                "Unknown backend '{}'. Use 'local' or 'database'",
                other
            ))),
        }
    }
}

/// User settings for the expense tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Persistence backend
    #[serde(default)]
    pub backend: StorageBackend,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// First day of the week for the weekly total
    #[serde(default)]
    pub week_start: WeekStart,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backend: StorageBackend::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            week_start: WeekStart::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    ///
    /// Defaults are not written; the caller decides when to persist.
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            read_json_required(&settings_path).map_err(|e| {
                ExpenseError::Config(format!("Failed to load settings file: {}", e))
            })
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
