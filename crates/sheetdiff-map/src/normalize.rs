//! Canonical comparison keys.

use sheetdiff_model::CellValue;

/// Normalizes a cell value into a comparison key.
///
/// - Absent values become the empty string
/// - Runs of whitespace collapse to a single space
/// - Leading/trailing whitespace is removed
/// - Converts to lowercase
pub fn normalize_text(value: &CellValue) -> String {
    if value.is_absent() {
        return String::new();
    }
    normalize_str(&value.to_string())
}

/// String form of [`normalize_text`].
pub fn normalize_str(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
