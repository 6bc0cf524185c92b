#![deny(unsafe_code)]

pub mod alignment;
pub mod cell;
pub mod grid;
pub mod options;
pub mod verdict;
pub mod workbook;
pub mod writer;

pub use alignment::{AlignedPair, Alignment, MappingEntry, MatchBasis};
pub use cell::CellValue;
pub use grid::{Grid, MemoryGrid, StyleId};
pub use options::{
    AlignOptions, ClassifierPolicy, DEFAULT_MAJOR_THRESHOLD, DEFAULT_SIMILARITY_THRESHOLD,
    DiffOptions, KeySelection,
};
pub use verdict::{CellVerdict, DiffValue, Severity};
pub use workbook::{Sheet, Workbook};
pub use writer::{SheetHandle, WorkbookWriter};
