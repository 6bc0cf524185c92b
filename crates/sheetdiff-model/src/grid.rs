//! Read-only grid abstraction and its in-memory implementation.
//!
//! Grids are 1-based: the first cell is `(1, 1)`. Reads outside the used
//! range return [`CellValue::Empty`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// Opaque per-cell style handle.
///
/// The diff engine never looks inside a style; it only hands the handle of a
/// source cell to the writer so formatting can be carried forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StyleId(pub u32);

/// Read access to a sheet of cells.
pub trait Grid {
    /// Highest row index holding a value (0 for an empty grid).
    fn max_row(&self) -> usize;

    /// Highest column index holding a value (0 for an empty grid).
    fn max_col(&self) -> usize;

    fn cell(&self, row: usize, col: usize) -> &CellValue;

    /// Every non-absent cell as `(row, col, value)` in row-major order.
    ///
    /// The default scans the whole used range; sparse grids override it to
    /// visit stored cells only.
    fn used_cells(&self) -> Box<dyn Iterator<Item = (usize, usize, &CellValue)> + '_> {
        let max_col = self.max_col();
        Box::new(
            (1..=self.max_row())
                .flat_map(move |row| (1..=max_col).map(move |col| (row, col)))
                .filter_map(move |(row, col)| {
                    let value = self.cell(row, col);
                    (!value.is_absent()).then_some((row, col, value))
                }),
        )
    }

    fn style(&self, _row: usize, _col: usize) -> Option<StyleId> {
        None
    }

    fn column_width(&self, _col: usize) -> Option<f64> {
        None
    }

    fn row_height(&self, _row: usize) -> Option<f64> {
        None
    }
}

/// Sparse grid backed by ordered maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryGrid {
    cells: BTreeMap<(usize, usize), CellValue>,
    styles: BTreeMap<(usize, usize), StyleId>,
    column_widths: BTreeMap<usize, f64>,
    row_heights: BTreeMap<usize, f64>,
    max_row: usize,
    max_col: usize,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grid from dense rows; `rows[0][0]` lands at `(1, 1)`.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = CellValue>,
    {
        let mut grid = Self::new();
        for (row_idx, row) in rows.into_iter().enumerate() {
            for (col_idx, value) in row.into_iter().enumerate() {
                grid.set(row_idx + 1, col_idx + 1, value);
            }
        }
        grid
    }

    /// Stores a value. Absent values clear the cell.
    ///
    /// Indices are 1-based; a zero index is ignored.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        if row == 0 || col == 0 {
            return;
        }
        if value.is_absent() {
            self.cells.remove(&(row, col));
            self.recompute_bounds();
            return;
        }
        self.cells.insert((row, col), value);
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
    }

    pub fn set_style(&mut self, row: usize, col: usize, style: StyleId) {
        self.styles.insert((row, col), style);
    }

    pub fn set_column_width(&mut self, col: usize, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn set_row_height(&mut self, row: usize, height: f64) {
        self.row_heights.insert(row, height);
    }

    /// Number of stored (non-absent) cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn recompute_bounds(&mut self) {
        self.max_row = self.cells.keys().map(|(row, _)| *row).max().unwrap_or(0);
        self.max_col = self.cells.keys().map(|(_, col)| *col).max().unwrap_or(0);
    }
}

impl Grid for MemoryGrid {
    fn max_row(&self) -> usize {
        self.max_row
    }

    fn max_col(&self) -> usize {
        self.max_col
    }

    fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.cells.get(&(row, col)).unwrap_or(&EMPTY)
    }

    fn used_cells(&self) -> Box<dyn Iterator<Item = (usize, usize, &CellValue)> + '_> {
        Box::new(self.cells.iter().map(|(&(row, col), value)| (row, col, value)))
    }

    fn style(&self, row: usize, col: usize) -> Option<StyleId> {
        self.styles.get(&(row, col)).copied()
    }

    fn column_width(&self, col: usize) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    fn row_height(&self, row: usize) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }
}
