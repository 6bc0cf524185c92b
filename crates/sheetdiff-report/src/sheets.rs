//! Output sheets as CSV files.

use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use sheetdiff_core::{MemoryWorkbook, OutputSheet};
use sheetdiff_model::Grid;
use tracing::info;

use crate::error::{ReportError, Result};

/// Writes every output sheet to `<dir>/<sheet>.csv`.
///
/// Each file is dense: `max_row` records of `max_col` fields, with unwritten
/// cells left empty. Returns the written paths in sheet order.
pub fn write_csv_sheets(dir: &Path, workbook: &MemoryWorkbook) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut outputs = Vec::with_capacity(workbook.sheets().len());
    for sheet in workbook.sheets() {
        let path = dir.join(format!("{}.csv", file_stem(&sheet.name)));
        let file = std::fs::File::create(&path).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        write_sheet(sheet, file).map_err(|source| ReportError::Csv {
            path: path.clone(),
            source,
        })?;
        info!(sheet = %sheet.name, path = %path.display(), "wrote sheet");
        outputs.push(path);
    }
    Ok(outputs)
}

/// Renders one output sheet as CSV text.
pub fn sheet_to_csv(sheet: &OutputSheet) -> Result<String> {
    let mut buffer = Vec::new();
    write_sheet(sheet, &mut buffer).map_err(|source| ReportError::Csv {
        path: PathBuf::from(&sheet.name),
        source,
    })?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_sheet<W: Write>(sheet: &OutputSheet, out: W) -> csv::Result<()> {
    let mut writer = WriterBuilder::new().from_writer(out);
    let max_col = sheet.max_col();
    if max_col > 0 {
        for row in 1..=sheet.max_row() {
            writer.write_record((1..=max_col).map(|col| sheet.cell(row, col).to_string()))?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Sheet name with path separators replaced.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' => '_',
            other => other,
        })
        .collect()
}
