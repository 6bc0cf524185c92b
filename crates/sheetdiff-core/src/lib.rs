//! Cell classification and diff assembly.
//!
//! [`diff_sheet`] aligns two grids and writes the classified result through a
//! [`sheetdiff_model::WorkbookWriter`]; [`diff_workbooks`] does the same for
//! every sheet pair of two workbooks.

#![deny(unsafe_code)]

pub mod assemble;
pub mod classify;
pub mod output;
pub mod workbook;

pub use assemble::{
    AxisCounts, ResolvedKeys, SheetOutcome, SheetSummary, SkipReason, SkippedSheet, SourceSide,
    diff_sheet,
};
pub use classify::{MISMATCH_SEPARATOR, classify, numeric_severity};
pub use output::{MemoryWorkbook, OutputCell, OutputSheet};
pub use workbook::{DiffWarning, WorkbookReport, diff_workbooks};
