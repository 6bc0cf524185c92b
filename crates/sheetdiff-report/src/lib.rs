//! Diff output emitters.
//!
//! - **CSV**: one dense file per output sheet
//! - **JSON**: sheet outcomes, mapping tables, and every written cell with its
//!   severity and presentation fill

mod error;
mod json;
mod palette;
mod sheets;

pub use error::{ReportError, Result};
pub use json::{render_json_report, write_json_report};
pub use palette::{CHANGE_FILL, MATCH_FILL, MISMATCH_FILL, fill_for};
pub use sheets::{sheet_to_csv, write_csv_sheets};
