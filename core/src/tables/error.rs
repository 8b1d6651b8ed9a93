//! Error types for table storage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors during training table loading and saving
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read table file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse table TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read table directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create table directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete table file {path}")]
    DeleteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write table file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize table '{id}'")]
    Serialize {
        id: String,
        #[source]
        source: toml::ser::Error,
    },

    #[error("invalid table in {path}: {reason}")]
    InvalidTable { path: PathBuf, reason: String },
}
