//! Append-only audit log writer

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{ExpenseError, ExpenseResult};

use super::entry::AuditEntry;

/// Writes audit entries as JSON lines
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry and flush it immediately
    pub fn log(&self, entry: &AuditEntry) -> ExpenseResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| ExpenseError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| ExpenseError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| ExpenseError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> ExpenseResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                ExpenseError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                ExpenseError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> ExpenseResult<Vec<AuditEntry>> {
        let mut all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries.split_off(start))
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}
