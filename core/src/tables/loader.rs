//! Table loading and saving.

use std::fs;
use std::path::{Path, PathBuf};

use apnea_types::{BreathCycle, TrainingTable};

use super::error::TableError;

/// Per-phase duration ceiling in seconds (5 minutes).
pub const MAX_PHASE_SECS: u32 = 300;

/// Directory holding table files, created on demand
/// (`~/.config/apnea/tables` on Linux).
pub fn tables_dir() -> Result<PathBuf, TableError> {
    let base = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("apnea")
        .join("tables");

    fs::create_dir_all(&base).map_err(|source| TableError::CreateDir {
        path: base.clone(),
        source,
    })?;
    Ok(base)
}

/// Load one table from a TOML file, validating its cycles.
pub fn load_table_file(path: &Path) -> Result<TrainingTable, TableError> {
    let content = fs::read_to_string(path).map_err(|source| TableError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let table: TrainingTable = toml::from_str(&content).map_err(|source| TableError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;

    if let Err(reason) = validate_table(&table) {
        return Err(TableError::InvalidTable {
            path: path.to_path_buf(),
            reason,
        });
    }

    Ok(table)
}

/// Load all tables in a directory, sorted by name.
/// Invalid files are skipped with a warning rather than failing the load.
pub fn load_tables_from_dir(dir: &Path) -> Result<Vec<TrainingTable>, TableError> {
    let mut tables = Vec::new();
    if !dir.exists() {
        return Ok(tables);
    }

    let entries = fs::read_dir(dir).map_err(|source| TableError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        match load_table_file(&path) {
            Ok(table) => tables.push(table),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping invalid table file");
            }
        }
    }

    tables.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(tables)
}

/// Load all tables from the default table directory.
pub fn load_tables() -> Result<Vec<TrainingTable>, TableError> {
    load_tables_from_dir(&tables_dir()?)
}

/// Save a table as `{id}.toml` in the given directory.
pub fn save_table_in(dir: &Path, table: &TrainingTable) -> Result<PathBuf, TableError> {
    if let Err(reason) = validate_table(table) {
        return Err(TableError::InvalidTable {
            path: dir.join(format!("{}.toml", table.id)),
            reason,
        });
    }

    let content = toml::to_string_pretty(table).map_err(|source| TableError::Serialize {
        id: table.id.clone(),
        source,
    })?;

    let path = dir.join(format!("{}.toml", table.id));
    fs::write(&path, content).map_err(|source| TableError::WriteFile {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Save a table into the default table directory.
pub fn save_table(table: &TrainingTable) -> Result<PathBuf, TableError> {
    save_table_in(&tables_dir()?, table)
}

/// Delete a table file by id from the default table directory.
pub fn delete_table(id: &str) -> Result<(), TableError> {
    let path = tables_dir()?.join(format!("{id}.toml"));
    fs::remove_file(&path).map_err(|source| TableError::DeleteFile { path, source })
}

/// Validate one cycle's durations: both phases positive and at most
/// [`MAX_PHASE_SECS`].
pub fn validate_cycle(cycle: &BreathCycle) -> Result<(), String> {
    if cycle.breathe_time == 0 || cycle.hold_time == 0 {
        return Err("breathe and hold times must be greater than 0".to_string());
    }
    if cycle.breathe_time > MAX_PHASE_SECS || cycle.hold_time > MAX_PHASE_SECS {
        return Err(format!(
            "breathe and hold times cannot exceed {MAX_PHASE_SECS} seconds"
        ));
    }
    Ok(())
}

fn validate_table(table: &TrainingTable) -> Result<(), String> {
    if table.id.is_empty() {
        return Err("table id is empty".to_string());
    }
    if table.name.is_empty() {
        return Err("table name is empty".to_string());
    }
    if table.cycles.is_empty() {
        return Err("table has no cycles".to_string());
    }
    for (i, cycle) in table.cycles.iter().enumerate() {
        validate_cycle(cycle).map_err(|reason| format!("cycle {i}: {reason}"))?;
    }
    Ok(())
}
