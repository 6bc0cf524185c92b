//! In-memory diff output.
//!
//! [`MemoryWorkbook`] records everything the assembler writes so it can be
//! inspected in tests or handed to a file emitter afterwards.

use std::collections::BTreeMap;

use serde::Serialize;
use sheetdiff_model::{CellValue, Grid, Severity, SheetHandle, StyleId, WorkbookWriter};

static EMPTY: CellValue = CellValue::Empty;

/// One written output cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutputCell {
    pub value: CellValue,
    pub severity: Option<Severity>,
    pub style: Option<StyleId>,
}

/// A sheet of diff output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSheet {
    pub name: String,
    cells: BTreeMap<(usize, usize), OutputCell>,
    column_widths: BTreeMap<usize, f64>,
    row_heights: BTreeMap<usize, f64>,
    max_row: usize,
    max_col: usize,
}

impl OutputSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn output_cell(&self, row: usize, col: usize) -> Option<&OutputCell> {
        self.cells.get(&(row, col))
    }

    pub fn severity(&self, row: usize, col: usize) -> Option<Severity> {
        self.cells.get(&(row, col)).and_then(|cell| cell.severity)
    }

    /// Written cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &OutputCell)> + '_ {
        self.cells.iter().map(|(position, cell)| (*position, cell))
    }

    pub fn column_widths(&self) -> &BTreeMap<usize, f64> {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &BTreeMap<usize, f64> {
        &self.row_heights
    }

    fn entry(&mut self, row: usize, col: usize) -> &mut OutputCell {
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        self.cells.entry((row, col)).or_default()
    }
}

impl Grid for OutputSheet {
    fn max_row(&self) -> usize {
        self.max_row
    }

    fn max_col(&self) -> usize {
        self.max_col
    }

    fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.cells.get(&(row, col)).map_or(&EMPTY, |cell| &cell.value)
    }

    fn used_cells(&self) -> Box<dyn Iterator<Item = (usize, usize, &CellValue)> + '_> {
        Box::new(
            self.cells
                .iter()
                .filter(|(_, cell)| !cell.value.is_absent())
                .map(|(&(row, col), cell)| (row, col, &cell.value)),
        )
    }

    fn style(&self, row: usize, col: usize) -> Option<StyleId> {
        self.cells.get(&(row, col)).and_then(|cell| cell.style)
    }

    fn column_width(&self, col: usize) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    fn row_height(&self, row: usize) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }
}

/// Ordered output sheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryWorkbook {
    sheets: Vec<OutputSheet>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[OutputSheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&OutputSheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    fn sheet_mut(&mut self, handle: SheetHandle) -> Option<&mut OutputSheet> {
        self.sheets.get_mut(handle.0)
    }
}

impl WorkbookWriter for MemoryWorkbook {
    fn create_sheet(&mut self, name: &str) -> SheetHandle {
        self.sheets.push(OutputSheet::new(name));
        SheetHandle(self.sheets.len() - 1)
    }

    fn set_cell_value(&mut self, sheet: SheetHandle, row: usize, col: usize, value: CellValue) {
        if let Some(sheet) = self.sheet_mut(sheet) {
            sheet.entry(row, col).value = value;
        }
    }

    fn set_cell_severity(&mut self, sheet: SheetHandle, row: usize, col: usize, severity: Severity) {
        if let Some(sheet) = self.sheet_mut(sheet) {
            sheet.entry(row, col).severity = Some(severity);
        }
    }

    fn copy_style(&mut self, sheet: SheetHandle, row: usize, col: usize, style: StyleId) {
        if let Some(sheet) = self.sheet_mut(sheet) {
            sheet.entry(row, col).style = Some(style);
        }
    }

    fn copy_column_width(&mut self, sheet: SheetHandle, col: usize, width: f64) {
        if let Some(sheet) = self.sheet_mut(sheet) {
            sheet.column_widths.insert(col, width);
        }
    }

    fn copy_row_height(&mut self, sheet: SheetHandle, row: usize, height: f64) {
        if let Some(sheet) = self.sheet_mut(sheet) {
            sheet.row_heights.insert(row, height);
        }
    }
}
