//! Error types for report output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing diff output.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to create the output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write CSV records.
    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to serialize the JSON report.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for report output.
pub type Result<T> = std::result::Result<T, ReportError>;
