//! Per-cell classification of aligned value pairs.

use sheetdiff_model::{CellValue, CellVerdict, ClassifierPolicy, Severity};

/// Separator between the two sides of a text difference.
pub const MISMATCH_SEPARATOR: &str = " <--> ";

/// Classifies an aligned pair of cells.
///
/// Numeric detection is a parse attempt on the value, independent of how the
/// reader typed the cell, so `"42"` and `42` compare numerically. Anything
/// that does not parse on both sides is compared as text. Never fails.
pub fn classify(first: &CellValue, second: &CellValue, policy: &ClassifierPolicy) -> CellVerdict {
    match (first.is_absent(), second.is_absent()) {
        (true, true) => CellVerdict::number(0.0, Severity::Match),
        (true, false) => match second.parse_number() {
            Some(value) => CellVerdict::number(value, Severity::OneSided),
            None => CellVerdict::text(second.to_string(), Severity::OneSided),
        },
        (false, true) => match first.parse_number() {
            Some(value) => CellVerdict::number(negate(value), Severity::OneSided),
            None => CellVerdict::text(format!("{first}{MISMATCH_SEPARATOR}"), Severity::OneSided),
        },
        (false, false) => match (first.parse_number(), second.parse_number()) {
            (Some(left), Some(right)) => {
                let delta = right - left;
                CellVerdict::number(delta, numeric_severity(delta, policy))
            }
            _ => {
                let left = first.to_string();
                let right = second.to_string();
                if left == right {
                    CellVerdict::text(left, Severity::Match)
                } else {
                    CellVerdict::text(
                        format!("{left}{MISMATCH_SEPARATOR}{right}"),
                        Severity::TextMismatch,
                    )
                }
            }
        },
    }
}

/// Buckets a numeric delta: zero, above the major threshold, or in between.
pub fn numeric_severity(delta: f64, policy: &ClassifierPolicy) -> Severity {
    if delta == 0.0 {
        Severity::Match
    } else if delta.abs() > policy.major_threshold {
        Severity::Major
    } else {
        Severity::Minor
    }
}

// Avoids emitting -0 for a removed zero.
fn negate(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { -value }
}
