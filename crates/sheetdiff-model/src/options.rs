//! Configuration options for a diff run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default minimum similarity for a fuzzy key match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Default absolute delta above which a numeric difference is `major`.
pub const DEFAULT_MAJOR_THRESHOLD: f64 = 100.0;

/// Which row or column supplies matching keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "index")]
pub enum KeySelection {
    /// A fixed 1-based index, applied to both sources.
    Fixed(usize),
    /// Pick per source with the key locator.
    Auto,
}

impl KeySelection {
    /// Interprets the command-line convention where `0` means auto-detect.
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            Self::Auto
        } else {
            Self::Fixed(index)
        }
    }

    /// Inverse of [`KeySelection::from_index`].
    pub fn as_index(&self) -> usize {
        match self {
            Self::Fixed(index) => *index,
            Self::Auto => 0,
        }
    }
}

impl Default for KeySelection {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

impl fmt::Display for KeySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(index) => write!(f, "{index}"),
            Self::Auto => f.write_str("auto"),
        }
    }
}

/// Options for key alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignOptions {
    /// Minimum Jaccard similarity for a fuzzy match (inclusive).
    pub similarity_threshold: f64,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

/// Fixed policy constants for cell classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierPolicy {
    /// Numeric deltas with an absolute value strictly above this are `major`.
    pub major_threshold: f64,
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            major_threshold: DEFAULT_MAJOR_THRESHOLD,
        }
    }
}

/// Everything a diff run needs besides the grids themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Column whose values key the rows.
    pub key_column: KeySelection,
    /// Row whose values key the columns.
    pub key_row: KeySelection,
    pub align: AlignOptions,
    pub classifier: ClassifierPolicy,
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_column(mut self, key_column: KeySelection) -> Self {
        self.key_column = key_column;
        self
    }

    pub fn with_key_row(mut self, key_row: KeySelection) -> Self {
        self.key_row = key_row;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.align.similarity_threshold = threshold;
        self
    }

    pub fn with_major_threshold(mut self, threshold: f64) -> Self {
        self.classifier.major_threshold = threshold;
        self
    }
}
