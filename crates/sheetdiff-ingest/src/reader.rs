//! CSV files as sheets.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::{Position, ReaderBuilder};
use sheetdiff_model::{CellValue, MemoryGrid, Sheet, Workbook};
use tracing::{debug, info};

use crate::discovery::{is_csv, list_csv_files, sheet_name};
use crate::error::{IngestError, Result};

fn normalize_cell(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}').trim()
}

/// Reads one CSV file into a sheet named after the file stem.
///
/// Every record lands on the grid row it occupies in the file, so blank lines
/// and rows of empty fields leave a gap instead of shifting later rows up. A
/// quoted field spanning several lines still counts as one row. Cells are
/// trimmed; empty cells stay absent and everything else is stored as text.
pub fn read_sheet(path: &Path) -> Result<Sheet> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let mut grid = MemoryGrid::new();
    let mut records = 0usize;
    let mut row = 0usize;
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let start = record.position().map_or(0, Position::byte);
        row += 1 + blank_lines_at(&bytes, start);
        for (col, raw) in record.iter().enumerate() {
            let value = normalize_cell(raw);
            if !value.is_empty() {
                grid.set(row, col + 1, CellValue::text(value));
            }
        }
        records += 1;
    }

    let name = sheet_name(path);
    debug!(
        sheet = %name,
        path = %path.display(),
        records,
        rows = row,
        cells = grid.len(),
        "read sheet"
    );
    Ok(Sheet::new(name, grid))
}

/// Number of empty lines starting at byte `start`.
///
/// The parser skips these silently before the next record. A `\n` left over
/// from the `\r\n` that ended the previous record is not a line of its own.
fn blank_lines_at(bytes: &[u8], start: u64) -> usize {
    let Ok(mut at) = usize::try_from(start) else {
        return 0;
    };
    if at > 0 && bytes.get(at - 1) == Some(&b'\r') && bytes.get(at) == Some(&b'\n') {
        at += 1;
    }
    let mut blank = 0;
    while let Some(&byte) = bytes.get(at) {
        match byte {
            b'\n' => blank += 1,
            b'\r' if bytes.get(at + 1) != Some(&b'\n') => blank += 1,
            b'\r' => {}
            _ => break,
        }
        at += 1;
    }
    blank
}

/// Reads a workbook from a CSV file or a directory of CSV files.
///
/// A directory yields one sheet per CSV file in file-name order. A directory
/// without CSV files, or with two files sharing a stem (`a.csv` and `a.CSV`),
/// is an error.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    if !path.exists() {
        return Err(IngestError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let sheets = if path.is_dir() {
        let files = list_csv_files(path)?;
        if files.is_empty() {
            return Err(IngestError::NoSheets {
                path: path.to_path_buf(),
            });
        }
        ensure_unique_stems(&files)?;
        files
            .iter()
            .map(|file| read_sheet(file.as_path()))
            .collect::<Result<Vec<_>>>()?
    } else if is_csv(path) {
        vec![read_sheet(path)?]
    } else {
        return Err(IngestError::Unsupported {
            path: path.to_path_buf(),
        });
    };

    info!(
        path = %path.display(),
        sheets = sheets.len(),
        "workbook loaded"
    );
    Ok(Workbook::new(sheets))
}

fn ensure_unique_stems(files: &[PathBuf]) -> Result<()> {
    let mut seen: BTreeMap<String, &PathBuf> = BTreeMap::new();
    for file in files {
        let name = sheet_name(file);
        if let Some(first) = seen.insert(name.clone(), file) {
            return Err(IngestError::DuplicateSheet {
                name,
                first: first.clone(),
                second: file.clone(),
            });
        }
    }
    Ok(())
}
