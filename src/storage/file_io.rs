//! JSON file helpers with atomic writes
//!
//! Writes go to a sibling `.tmp` file that is synced and then renamed over
//! the target, so readers see either the old document or the new one.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ExpenseError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> ExpenseError {
    ExpenseError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Open and parse `path`; `Ok(None)` when the file does not exist
fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ExpenseError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| storage_error("parse", path, e))
}

/// Read JSON from a file, or `T::default()` if it doesn't exist yet
pub fn read_json<T, P>(path: P) -> Result<T, ExpenseError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    Ok(parse_file(path.as_ref())?.unwrap_or_default())
}

/// Read JSON from a file that must exist
pub fn read_json_required<T, P>(path: P) -> Result<T, ExpenseError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    parse_file(path)?
        .ok_or_else(|| ExpenseError::Storage(format!("File not found: {}", path.display())))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write JSON to a file atomically, creating parent directories
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ExpenseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let result = (|| {
        let file = File::create(&temp_path).map_err(|e| storage_error("create", &temp_path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| storage_error("serialize", path, e))?;
        writer.flush().map_err(|e| storage_error("flush", &temp_path, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| storage_error("sync", &temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| storage_error("replace", path, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Remove a file; returns whether there was one
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<bool, ExpenseError> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(storage_error("remove", path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Snapshot {
        owner: String,
        count: i32,
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            owner: "local".to_string(),
            count: 3,
        }
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let data: Snapshot = read_json(&path).unwrap();
        assert_eq!(data, Snapshot::default());
        assert!(read_json_required::<Snapshot, _>(&path).is_err());
    }

    #[test]
    fn test_round_trip_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");

        write_json_atomic(&path, &snapshot()).unwrap();

        assert!(!temp_dir.path().join("expenses.json.tmp").exists());
        assert_eq!(read_json_required::<Snapshot, _>(&path).unwrap(), snapshot());
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");

        write_json_atomic(&path, &snapshot()).unwrap();
        let updated = Snapshot {
            count: 4,
            ..snapshot()
        };
        write_json_atomic(&path, &updated).unwrap();

        assert_eq!(read_json::<Snapshot, _>(&path).unwrap(), updated);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("data").join("expenses.json");

        write_json_atomic(&path, &snapshot()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_remove_if_exists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        assert!(!remove_if_exists(&path).unwrap());

        fs::write(&path, "{}").unwrap();
        assert!(remove_if_exists(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let result: Result<Snapshot, _> = read_json(&path);
        assert!(matches!(result, Err(ExpenseError::Storage(_))));
    }
}
