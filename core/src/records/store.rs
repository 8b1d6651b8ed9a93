//! Record reading and writing.

use std::fs;
use std::path::{Path, PathBuf};

use apnea_types::PracticeRecord;
use chrono::{DateTime, Utc};

use super::error::RecordError;

/// Records directory, created on demand
/// (`~/.local/share/apnea/records` on Linux).
pub fn records_dir() -> Result<PathBuf, RecordError> {
    let base = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("apnea")
        .join("records");

    fs::create_dir_all(&base).map_err(|source| RecordError::CreateDir {
        path: base.clone(),
        source,
    })?;
    Ok(base)
}

/// Record filename derived from the completion timestamp.
pub fn record_filename(completed_at: &DateTime<Utc>) -> String {
    format!("{}.toml", completed_at.format("%Y%m%dT%H%M%S"))
}

/// Write a record into the given directory.
pub fn save_record_in(dir: &Path, record: &PracticeRecord) -> Result<PathBuf, RecordError> {
    let content = toml::to_string_pretty(record)?;
    let path = dir.join(record_filename(&record.completed_at));
    fs::write(&path, content).map_err(|source| RecordError::WriteFile {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Write a record into the default records directory.
pub fn save_record(record: &PracticeRecord) -> Result<PathBuf, RecordError> {
    save_record_in(&records_dir()?, record)
}

/// Load all records from a directory, sorted by completion time.
/// Unparseable files are skipped with a warning.
pub fn load_records_from(dir: &Path) -> Result<Vec<PracticeRecord>, RecordError> {
    let mut records = Vec::new();
    if !dir.exists() {
        return Ok(records);
    }

    let entries = fs::read_dir(dir).map_err(|source| RecordError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        match load_record_file(&path) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping invalid record file");
            }
        }
    }

    records.sort_by_key(|r| r.completed_at);
    Ok(records)
}

/// Load all records from the default records directory.
pub fn load_records() -> Result<Vec<PracticeRecord>, RecordError> {
    load_records_from(&records_dir()?)
}

fn load_record_file(path: &Path) -> Result<PracticeRecord, RecordError> {
    let content = fs::read_to_string(path).map_err(|source| RecordError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| RecordError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}
