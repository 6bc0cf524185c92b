//! JSON diff report.

use std::path::Path;

use serde::Serialize;
use sheetdiff_core::{DiffWarning, MemoryWorkbook, SheetOutcome, WorkbookReport};
use sheetdiff_model::{CellValue, DiffOptions, Grid, Severity};
use tracing::info;

use crate::error::{ReportError, Result};
use crate::palette::fill_for;

#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    tool: &'static str,
    version: &'static str,
    strategy: &'a str,
    options: &'a DiffOptions,
    summary: Totals,
    outcomes: &'a [SheetOutcome],
    warnings: &'a [DiffWarning],
    sheets: Vec<SheetCells<'a>>,
}

#[derive(Debug, Serialize)]
struct Totals {
    compared: usize,
    skipped: usize,
    differences: usize,
}

#[derive(Debug, Serialize)]
struct SheetCells<'a> {
    name: &'a str,
    rows: usize,
    columns: usize,
    cells: Vec<CellRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct CellRecord<'a> {
    row: usize,
    col: usize,
    value: &'a CellValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill: Option<&'static str>,
}

/// Renders the report as pretty-printed JSON.
pub fn render_json_report(report: &WorkbookReport, workbook: &MemoryWorkbook) -> Result<String> {
    let sheets = workbook
        .sheets()
        .iter()
        .map(|sheet| SheetCells {
            name: &sheet.name,
            rows: sheet.max_row(),
            columns: sheet.max_col(),
            cells: sheet
                .cells()
                .map(|((row, col), cell)| CellRecord {
                    row,
                    col,
                    value: &cell.value,
                    severity: cell.severity,
                    fill: cell.severity.map(fill_for),
                })
                .collect(),
        })
        .collect();

    let document = ReportDocument {
        tool: "sheetdiff",
        version: env!("CARGO_PKG_VERSION"),
        strategy: &report.strategy,
        options: &report.options,
        summary: Totals {
            compared: report.compared_count(),
            skipped: report.skipped_count(),
            differences: report.difference_count(),
        },
        outcomes: &report.outcomes,
        warnings: &report.warnings,
        sheets,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Writes the JSON report to `path`.
pub fn write_json_report(
    path: &Path,
    report: &WorkbookReport,
    workbook: &MemoryWorkbook,
) -> Result<()> {
    let json = render_json_report(report, workbook)?;
    std::fs::write(path, json).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote report");
    Ok(())
}
