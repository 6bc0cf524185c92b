//! Cell values as they come out of a source grid.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell value.
///
/// Values are kept exactly as the reader produced them. Whether a text cell
/// holds a number is decided later by an explicit parse attempt, never by the
/// variant alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for empty cells, empty text, and NaN numbers.
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Number(value) => value.is_nan(),
            Self::Text(value) => value.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Attempts to read the value as a finite real number.
    ///
    /// Numbers pass through; text is trimmed and parsed. Absent values and
    /// non-finite results yield `None`.
    pub fn parse_number(&self) -> Option<f64> {
        let parsed = match self {
            Self::Empty => return None,
            Self::Number(value) => *value,
            Self::Text(value) => value.trim().parse::<f64>().ok()?,
        };
        parsed.is_finite().then_some(parsed)
    }

    pub fn is_numeric(&self) -> bool {
        self.parse_number().is_some()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        // Row and column indices stay far below 2^53.
        Self::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
