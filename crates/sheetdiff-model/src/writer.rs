//! Output side of the grid boundary.

use crate::cell::CellValue;
use crate::grid::StyleId;
use crate::verdict::Severity;

/// Handle to a sheet created through a [`WorkbookWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetHandle(pub usize);

/// Sink for diff output.
///
/// Implementations own presentation: how a [`Severity`] is rendered and
/// what a carried-forward [`StyleId`] means are writer decisions. Indices are
/// 1-based.
pub trait WorkbookWriter {
    fn create_sheet(&mut self, name: &str) -> SheetHandle;

    fn set_cell_value(&mut self, sheet: SheetHandle, row: usize, col: usize, value: CellValue);

    fn set_cell_severity(&mut self, sheet: SheetHandle, row: usize, col: usize, severity: Severity);

    fn copy_style(&mut self, sheet: SheetHandle, row: usize, col: usize, style: StyleId);

    fn copy_column_width(&mut self, sheet: SheetHandle, col: usize, width: f64);

    fn copy_row_height(&mut self, sheet: SheetHandle, row: usize, height: f64);
}
