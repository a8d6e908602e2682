//! Export module for the expense tracker
//!
//! Writes one owner's expenses in three formats:
//! - CSV: one row per expense, spreadsheet-compatible
//! - JSON: the expense list plus its summary, schema-versioned
//! - YAML: the same document as JSON, with a comment header

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::str::FromStr;

use crate::error::ExpenseError;

pub use csv::export_expenses_csv;
pub use json::{export_json, ExpenseExport, ExportMetadata, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(ExpenseError::Export(format!(
                "Unknown export format '{}'. Use csv, json or yaml",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
