//! Key matching between two grids.
//!
//! Normalizes key cells, scores key similarity, aligns rows and columns, and
//! locates key rows/columns when none is given.

#![deny(unsafe_code)]

pub mod align;
pub mod locate;
pub mod normalize;
pub mod similarity;

pub use align::{
    AlignmentStrategy, GreedyAligner, KeyedIndex, align, keyed_columns, keyed_rows,
};
pub use locate::{KeyLocation, locate_keys, resolve_key_column, resolve_key_row};
pub use normalize::{normalize_str, normalize_text};
pub use similarity::similarity;
