//! Workbook ingestion from CSV.
//!
//! A directory of CSV files is read as a workbook with one sheet per file; a
//! single CSV file is a one-sheet workbook.
//!
//! ```ignore
//! use std::path::Path;
//! use sheetdiff_ingest::read_workbook;
//!
//! let workbook = read_workbook(Path::new("reports/2024-q1"))?;
//! for name in workbook.sheet_names() {
//!     println!("{name}");
//! }
//! ```

mod discovery;
mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{is_csv, list_csv_files, sheet_name};

// === Reading ===
pub use reader::{read_sheet, read_workbook};
