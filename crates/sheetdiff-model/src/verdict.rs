//! Classification results for aligned cell pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Severity tag attached to a diffed cell.
///
/// Presentation (fill colors and the like) is owned by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Match,
    Minor,
    Major,
    TextMismatch,
    OneSided,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Self::Match,
        Self::Minor,
        Self::Major,
        Self::TextMismatch,
        Self::OneSided,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Minor => "minor",
            Self::Major => "major",
            Self::TextMismatch => "text-mismatch",
            Self::OneSided => "one-sided",
        }
    }

    /// True for every severity except [`Severity::Match`].
    pub fn is_difference(&self) -> bool {
        !matches!(self, Self::Match)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The diff artifact for one cell: a signed delta or a text rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiffValue {
    Number(f64),
    Text(String),
}

impl DiffValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(value) => Some(value),
        }
    }
}

impl fmt::Display for DiffValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<DiffValue> for CellValue {
    fn from(value: DiffValue) -> Self {
        match value {
            DiffValue::Number(number) => CellValue::Number(number),
            DiffValue::Text(text) => CellValue::Text(text),
        }
    }
}

/// Outcome of classifying one aligned cell pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellVerdict {
    pub diff: DiffValue,
    pub severity: Severity,
}

impl CellVerdict {
    pub fn number(diff: f64, severity: Severity) -> Self {
        Self {
            diff: DiffValue::Number(diff),
            severity,
        }
    }

    pub fn text(diff: impl Into<String>, severity: Severity) -> Self {
        Self {
            diff: DiffValue::Text(diff.into()),
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_names_are_kebab_case() {
        assert_eq!(Severity::TextMismatch.to_string(), "text-mismatch");
        assert_eq!(Severity::OneSided.as_str(), "one-sided");
        let json = serde_json::to_string(&Severity::TextMismatch).expect("serialize severity");
        assert_eq!(json, r#""text-mismatch""#);
    }

    #[test]
    fn diff_value_converts_to_cell() {
        assert_eq!(
            CellValue::from(DiffValue::Number(3.0)),
            CellValue::Number(3.0)
        );
        assert_eq!(
            CellValue::from(DiffValue::Text("a <--> b".into())),
            CellValue::text("a <--> b")
        );
    }
}
