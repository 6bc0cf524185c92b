//! Diff pipeline: read both inputs, diff, write outputs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use sheetdiff_core::{MemoryWorkbook, WorkbookReport, diff_workbooks};
use sheetdiff_ingest::read_workbook;
use sheetdiff_map::locate_keys;
use sheetdiff_model::{DiffOptions, Grid, Workbook};
use sheetdiff_report::{write_csv_sheets, write_json_report};
use tracing::{debug, info, info_span};

/// File name of the JSON report inside the output directory.
pub const REPORT_FILENAME: &str = "report.json";

#[derive(Debug, Clone)]
pub struct DiffRequest {
    pub file1: PathBuf,
    pub file2: PathBuf,
    pub output_dir: PathBuf,
    pub options: DiffOptions,
    pub write_report: bool,
}

#[derive(Debug)]
pub struct DiffRun {
    pub output_dir: PathBuf,
    pub report: WorkbookReport,
    pub sheet_files: Vec<PathBuf>,
    pub report_file: Option<PathBuf>,
}

/// Detected key row and column of one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetKeys {
    pub sheet: String,
    pub key_row: usize,
    pub key_column: usize,
    pub rows: usize,
    pub columns: usize,
}

pub fn run_diff(request: &DiffRequest) -> Result<DiffRun> {
    let span = info_span!("diff", output = %request.output_dir.display());
    let _guard = span.enter();

    ensure_exists(&request.file1)?;
    ensure_exists(&request.file2)?;

    let first = read_workbook(&request.file1)
        .with_context(|| format!("read {}", request.file1.display()))?;
    let mut second = read_workbook(&request.file2)
        .with_context(|| format!("read {}", request.file2.display()))?;
    if request.file1.is_file() && request.file2.is_file() {
        pair_single_sheets(&first, &mut second);
    }

    let mut output = MemoryWorkbook::new();
    let report = diff_workbooks(&first, &second, &request.options, &mut output);

    let sheet_files = write_csv_sheets(&request.output_dir, &output)
        .with_context(|| format!("write sheets to {}", request.output_dir.display()))?;
    let report_file = if request.write_report {
        let path = request.output_dir.join(REPORT_FILENAME);
        write_json_report(&path, &report, &output)
            .with_context(|| format!("write {}", path.display()))?;
        Some(path)
    } else {
        None
    };

    info!(
        sheets_written = sheet_files.len(),
        report = report_file.is_some(),
        "diff outputs written"
    );
    Ok(DiffRun {
        output_dir: request.output_dir.clone(),
        report,
        sheet_files,
        report_file,
    })
}

/// Two single-file inputs are compared with each other whatever their file
/// names; the second sheet takes the first one's name.
fn pair_single_sheets(first: &Workbook, second: &mut Workbook) {
    if let ([only_a], [only_b]) = (first.sheets.as_slice(), second.sheets.as_mut_slice())
        && only_b.name != only_a.name
    {
        debug!(from = %only_b.name, to = %only_a.name, "pairing single-file sheets");
        only_b.name.clone_from(&only_a.name);
    }
}

/// Runs key detection on every sheet of `input`.
pub fn detect_keys(input: &Path) -> Result<Vec<SheetKeys>> {
    ensure_exists(input)?;
    let workbook = read_workbook(input).with_context(|| format!("read {}", input.display()))?;
    Ok(workbook
        .sheets
        .iter()
        .map(|sheet| {
            let location = locate_keys(&sheet.grid);
            SheetKeys {
                sheet: sheet.name.clone(),
                key_row: location.row,
                key_column: location.col,
                rows: sheet.grid.max_row(),
                columns: sheet.grid.max_col(),
            }
        })
        .collect())
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("file not found: {}", path.display());
    }
    Ok(())
}
