//! Key row/column detection.
//!
//! Header and label cells tend to be text while data cells tend to be numbers,
//! so the row and the column with the most textual cells are taken as keys.
//! A sheet without a clear header still gets a deterministic answer.

use std::collections::BTreeMap;

use sheetdiff_model::{CellValue, Grid, KeySelection};
use tracing::debug;

/// Chosen key row and key column, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLocation {
    pub row: usize,
    pub col: usize,
}

fn is_textual(value: &CellValue) -> bool {
    !value.is_absent() && !value.is_numeric()
}

/// Picks the row and the column with the most textual cells.
///
/// Row and column are chosen independently; ties go to the lowest index and
/// an empty grid yields `(1, 1)`.
pub fn locate_keys<G: Grid + ?Sized>(grid: &G) -> KeyLocation {
    let mut row_counts: BTreeMap<usize, usize> = BTreeMap::new();
    let mut col_counts: BTreeMap<usize, usize> = BTreeMap::new();

    for (row, col, value) in grid.used_cells() {
        if is_textual(value) {
            *row_counts.entry(row).or_insert(0) += 1;
            *col_counts.entry(col).or_insert(0) += 1;
        }
    }

    let location = KeyLocation {
        row: first_max(&row_counts),
        col: first_max(&col_counts),
    };
    debug!(
        key_row = location.row,
        key_col = location.col,
        row_text_cells = row_counts.get(&location.row).copied().unwrap_or(0),
        col_text_cells = col_counts.get(&location.col).copied().unwrap_or(0),
        "located keys"
    );
    location
}

/// Lowest index holding the maximum count; 1 when there is none.
fn first_max(counts: &BTreeMap<usize, usize>) -> usize {
    let mut best_index = 1;
    let mut best_count = 0;
    for (&index, &count) in counts {
        if count > best_count {
            best_count = count;
            best_index = index;
        }
    }
    best_index
}

/// Resolves the column that keys the rows of `grid`.
pub fn resolve_key_column<G: Grid + ?Sized>(selection: KeySelection, grid: &G) -> usize {
    match selection {
        KeySelection::Fixed(col) => col,
        KeySelection::Auto => locate_keys(grid).col,
    }
}

/// Resolves the row that keys the columns of `grid`.
pub fn resolve_key_row<G: Grid + ?Sized>(selection: KeySelection, grid: &G) -> usize {
    match selection {
        KeySelection::Fixed(row) => row,
        KeySelection::Auto => locate_keys(grid).row,
    }
}

#[cfg(test)]
mod tests {
    use sheetdiff_model::MemoryGrid;

    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::text(value)
    }

    #[test]
    fn header_row_and_label_column_win() {
        let grid = MemoryGrid::from_rows(vec![
            vec![text("ID"), text("Name"), text("Age"), text("City")],
            vec![text("A"), text("Alice"), CellValue::Number(25.0), text("NYC")],
            vec![text("B"), text("Bob"), CellValue::Number(30.0), text("LA")],
            vec![text("C"), text("Charlie"), CellValue::Number(35.0), text("Chicago")],
        ]);
        // Column 1, 2 and 4 tie on four text cells; the lowest index wins.
        assert_eq!(locate_keys(&grid), KeyLocation { row: 1, col: 1 });
    }

    #[test]
    fn digit_strings_count_as_numbers() {
        let grid = MemoryGrid::from_rows(vec![
            vec![text("1"), text("2"), text("3")],
            vec![text("x"), text("y"), text("4")],
        ]);
        assert_eq!(locate_keys(&grid), KeyLocation { row: 2, col: 1 });
    }

    #[test]
    fn empty_grid_defaults_to_origin() {
        assert_eq!(
            locate_keys(&MemoryGrid::new()),
            KeyLocation { row: 1, col: 1 }
        );
    }

    #[test]
    fn all_numeric_grid_defaults_to_origin() {
        let grid = MemoryGrid::from_rows(vec![
            vec![CellValue::Number(1.0), CellValue::Number(2.0)],
            vec![CellValue::Number(3.0), CellValue::Number(4.0)],
        ]);
        assert_eq!(locate_keys(&grid), KeyLocation { row: 1, col: 1 });
    }

    #[test]
    fn far_out_cells_in_a_sparse_grid_are_cheap() {
        let mut grid = MemoryGrid::new();
        grid.set(1, 1, CellValue::Number(1.0));
        grid.set(4_000_000_000, 3_000_000_000, text("far"));
        assert_eq!(
            locate_keys(&grid),
            KeyLocation {
                row: 4_000_000_000,
                col: 3_000_000_000
            }
        );
    }

    #[test]
    fn fixed_selection_bypasses_detection() {
        let grid = MemoryGrid::from_rows(vec![vec![CellValue::Number(1.0), text("label")]]);
        assert_eq!(resolve_key_column(KeySelection::Fixed(3), &grid), 3);
        assert_eq!(resolve_key_column(KeySelection::Auto, &grid), 2);
        assert_eq!(resolve_key_row(KeySelection::Auto, &grid), 1);
    }
}
