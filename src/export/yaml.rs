//! YAML export for a human-readable copy of the data

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};

use super::json::ExpenseExport;

/// Write the export as YAML with a comment header
pub fn export_yaml<W: Write>(export: &ExpenseExport, writer: &mut W) -> ExpenseResult<()> {
    let header = format!(
        "# Expense Tracker Export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ExpenseSummary;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_yaml_export() {
        let now = Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap();
        let export = ExpenseExport::new(Vec::new(), ExpenseSummary::default(), Some("alice".into()), now);

        let mut output = Vec::new();
        export_yaml(&export, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# Expense Tracker Export"));
        assert!(yaml.contains("owner: alice"));
        assert!(yaml.contains("expense_count: 0"));

        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["schema_version"].as_str(), Some("1.0.0"));
    }
}
