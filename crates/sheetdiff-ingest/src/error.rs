//! Error types for workbook ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a CSV workbook.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input path does not exist.
    #[error("input not found: {path}")]
    NotFound { path: PathBuf },

    /// Path is neither a CSV file nor a directory.
    #[error("not a CSV file or directory: {path}")]
    Unsupported { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a CSV file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a CSV file.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Two files in one directory map to the same sheet name.
    #[error("sheet '{name}' is defined twice: {first} and {second}")]
    DuplicateSheet {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Directory holds no CSV files.
    #[error("no CSV files in {path}")]
    NoSheets { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
