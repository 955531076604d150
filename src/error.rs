//! Errors surfaced at the storage and export boundaries. The scheduling
//! functions themselves are total and return plain values.
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the SQLite persistence layer
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored timestamp could not be parsed back
    #[error("invalid timestamp '{value}'")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A stored id was not a valid UUID
    #[error("invalid id '{value}'")]
    InvalidId {
        value: String,
        #[source]
        source: uuid::Error,
    },

    /// Stats snapshot could not be decoded
    #[error("invalid stats snapshot: {0}")]
    InvalidStats(#[from] serde_json::Error),
}

/// Errors from JSON deck export/import
#[derive(Debug, Error)]
pub enum ExportError {
    /// File could not be read or written
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents were not a valid deck document
    #[error("invalid deck file: {0}")]
    Json(#[from] serde_json::Error),
}
