//! Sheet-level diff assembly.
//!
//! Aligns the rows and columns of two grids, then writes one output sheet:
//! the row mapping table, the column mapping table, a separator, and the
//! classified data block. A sheet whose rows or columns do not align at all
//! is skipped without creating an output sheet.

use std::collections::BTreeMap;

use serde::Serialize;
use sheetdiff_map::{
    AlignmentStrategy, GreedyAligner, keyed_columns, keyed_rows, resolve_key_column,
    resolve_key_row,
};
use sheetdiff_model::{
    Alignment, CellValue, DiffOptions, Grid, MappingEntry, MatchBasis, Severity, SheetHandle,
    WorkbookWriter,
};
use tracing::{debug, info, info_span, warn};

use crate::classify::classify;

pub const ROW_MAPPING_TITLE: &str = "Row Mapping (File1 -> File2)";
pub const COLUMN_MAPPING_TITLE: &str = "Column Mapping (File1 -> File2)";
pub const FIRST_ROW_HEADER: &str = "File1 Row";
pub const SECOND_ROW_HEADER: &str = "File2 Row";
pub const FIRST_COLUMN_HEADER: &str = "File1 Column";
pub const SECOND_COLUMN_HEADER: &str = "File2 Column";
pub const KEY_VALUE_HEADER: &str = "Key Value";
pub const SEPARATOR_WIDTH: usize = 50;

/// Which input a sheet was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSide {
    First,
    Second,
}

/// Why a sheet produced no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "present_in", rename_all = "snake_case")]
pub enum SkipReason {
    /// The sheet exists only in the given source.
    MissingInSource(SourceSide),
    NoRowMatches,
    NoColumnMatches,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInSource(SourceSide::First) => write!(f, "only in first input"),
            Self::MissingInSource(SourceSide::Second) => write!(f, "only in second input"),
            Self::NoRowMatches => write!(f, "no matching rows"),
            Self::NoColumnMatches => write!(f, "no matching columns"),
        }
    }
}

/// Key column and key row used for each source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedKeys {
    pub column_a: usize,
    pub column_b: usize,
    pub row_a: usize,
    pub row_b: usize,
}

/// Keyed and matched index counts along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AxisCounts {
    pub keyed_a: usize,
    pub keyed_b: usize,
    pub matched: usize,
    pub exact: usize,
    pub fuzzy: usize,
}

impl AxisCounts {
    fn new(keyed_a: usize, keyed_b: usize, alignment: &Alignment) -> Self {
        Self {
            keyed_a,
            keyed_b,
            matched: alignment.len(),
            exact: alignment.count_by_basis(MatchBasis::Exact),
            fuzzy: alignment.count_by_basis(MatchBasis::Fuzzy),
        }
    }

    /// Source-A indices with a key that found no partner.
    pub fn unmatched_a(&self) -> usize {
        self.keyed_a.saturating_sub(self.matched)
    }

    pub fn unmatched_b(&self) -> usize {
        self.keyed_b.saturating_sub(self.matched)
    }
}

/// Result of a compared sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub keys: ResolvedKeys,
    pub rows: AxisCounts,
    pub columns: AxisCounts,
    pub row_mapping: Vec<MappingEntry>,
    pub column_mapping: Vec<MappingEntry>,
    /// First output row of the data block.
    pub data_start_row: usize,
    pub severities: BTreeMap<Severity, usize>,
}

impl SheetSummary {
    pub fn severity_count(&self, severity: Severity) -> usize {
        self.severities.get(&severity).copied().unwrap_or(0)
    }

    /// Cells whose verdict is anything but a match.
    pub fn difference_count(&self) -> usize {
        self.severities
            .iter()
            .filter(|(severity, _)| severity.is_difference())
            .map(|(_, count)| count)
            .sum()
    }
}

/// A sheet that produced no output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedSheet {
    pub name: String,
    pub reason: SkipReason,
    pub rows: AxisCounts,
    pub columns: AxisCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetOutcome {
    Compared(SheetSummary),
    Skipped(SkippedSheet),
}

impl SheetOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Compared(summary) => &summary.name,
            Self::Skipped(skipped) => &skipped.name,
        }
    }

    pub fn is_compared(&self) -> bool {
        matches!(self, Self::Compared(_))
    }

    pub fn summary(&self) -> Option<&SheetSummary> {
        match self {
            Self::Compared(summary) => Some(summary),
            Self::Skipped(_) => None,
        }
    }
}

/// Diffs one pair of same-named sheets into `writer`.
///
/// Both alignments are computed before anything is written, with a
/// [`GreedyAligner`] at `options.align.similarity_threshold`. Unmatched rows
/// and columns are left out of the output and only show up in the counts.
pub fn diff_sheet<A, B>(
    name: &str,
    a: &A,
    b: &B,
    options: &DiffOptions,
    writer: &mut dyn WorkbookWriter,
) -> SheetOutcome
where
    A: Grid + ?Sized,
    B: Grid + ?Sized,
{
    let strategy = GreedyAligner::from_options(&options.align);
    let span = info_span!(
        "sheet",
        sheet = %name,
        strategy = strategy.name(),
        threshold = strategy.threshold()
    );
    let _guard = span.enter();

    let keys = ResolvedKeys {
        column_a: resolve_key_column(options.key_column, a),
        column_b: resolve_key_column(options.key_column, b),
        row_a: resolve_key_row(options.key_row, a),
        row_b: resolve_key_row(options.key_row, b),
    };
    debug!(
        key_column_a = keys.column_a,
        key_column_b = keys.column_b,
        key_row_a = keys.row_a,
        key_row_b = keys.row_b,
        "resolved keys"
    );

    let rows_a = keyed_rows(a, keys.column_a);
    let rows_b = keyed_rows(b, keys.column_b);
    let row_alignment = strategy.align(&rows_a, &rows_b);

    let cols_a = keyed_columns(a, keys.row_a);
    let cols_b = keyed_columns(b, keys.row_b);
    let col_alignment = strategy.align(&cols_a, &cols_b);

    let rows = AxisCounts::new(rows_a.len(), rows_b.len(), &row_alignment);
    let columns = AxisCounts::new(cols_a.len(), cols_b.len(), &col_alignment);

    let skip = if row_alignment.is_empty() {
        Some(SkipReason::NoRowMatches)
    } else if col_alignment.is_empty() {
        Some(SkipReason::NoColumnMatches)
    } else {
        None
    };
    if let Some(reason) = skip {
        warn!(
            reason = %reason,
            keyed_rows_a = rows.keyed_a,
            keyed_rows_b = rows.keyed_b,
            keyed_columns_a = columns.keyed_a,
            keyed_columns_b = columns.keyed_b,
            "skipping sheet"
        );
        return SheetOutcome::Skipped(SkippedSheet {
            name: name.to_string(),
            reason,
            rows,
            columns,
        });
    }

    let row_mapping: Vec<MappingEntry> = row_alignment
        .iter()
        .map(|(source_a, source_b)| MappingEntry {
            source_a,
            source_b,
            key: a.cell(source_a, keys.column_a).clone(),
        })
        .collect();
    let column_mapping: Vec<MappingEntry> = col_alignment
        .iter()
        .map(|(source_a, source_b)| MappingEntry {
            source_a,
            source_b,
            key: a.cell(keys.row_a, source_a).clone(),
        })
        .collect();

    let sheet = writer.create_sheet(name);
    let data_start_row = write_mapping_tables(writer, sheet, &row_mapping, &column_mapping);
    let severities = write_data_block(
        writer,
        sheet,
        a,
        b,
        options,
        &row_mapping,
        &column_mapping,
        data_start_row,
    );
    carry_dimensions(writer, sheet, a, b, &row_mapping, &column_mapping, data_start_row);

    let summary = SheetSummary {
        name: name.to_string(),
        keys,
        rows,
        columns,
        row_mapping,
        column_mapping,
        data_start_row,
        severities,
    };
    info!(
        matched_rows = summary.rows.matched,
        matched_columns = summary.columns.matched,
        unmatched_rows_a = summary.rows.unmatched_a(),
        unmatched_columns_a = summary.columns.unmatched_a(),
        differences = summary.difference_count(),
        "sheet compared"
    );
    SheetOutcome::Compared(summary)
}

/// Writes both mapping tables and the separator; returns the data start row.
fn write_mapping_tables(
    writer: &mut dyn WorkbookWriter,
    sheet: SheetHandle,
    row_mapping: &[MappingEntry],
    column_mapping: &[MappingEntry],
) -> usize {
    let mut row = 1;
    write_table(
        writer,
        sheet,
        &mut row,
        [ROW_MAPPING_TITLE, FIRST_ROW_HEADER, SECOND_ROW_HEADER, KEY_VALUE_HEADER],
        row_mapping,
    );
    row += 1;
    write_table(
        writer,
        sheet,
        &mut row,
        [
            COLUMN_MAPPING_TITLE,
            FIRST_COLUMN_HEADER,
            SECOND_COLUMN_HEADER,
            KEY_VALUE_HEADER,
        ],
        column_mapping,
    );
    row += 1;
    writer.set_cell_value(sheet, row, 1, CellValue::text("=".repeat(SEPARATOR_WIDTH)));
    row + 2
}

fn write_table(
    writer: &mut dyn WorkbookWriter,
    sheet: SheetHandle,
    row: &mut usize,
    headers: [&str; 4],
    entries: &[MappingEntry],
) {
    for (col, header) in headers.iter().enumerate() {
        writer.set_cell_value(sheet, *row, col + 1, CellValue::text(*header));
    }
    *row += 1;
    for entry in entries {
        writer.set_cell_value(sheet, *row, 2, CellValue::from(entry.source_a));
        writer.set_cell_value(sheet, *row, 3, CellValue::from(entry.source_b));
        writer.set_cell_value(sheet, *row, 4, entry.key.clone());
        *row += 1;
    }
}

#[allow(clippy::too_many_arguments)]
fn write_data_block<A, B>(
    writer: &mut dyn WorkbookWriter,
    sheet: SheetHandle,
    a: &A,
    b: &B,
    options: &DiffOptions,
    row_mapping: &[MappingEntry],
    column_mapping: &[MappingEntry],
    data_start_row: usize,
) -> BTreeMap<Severity, usize>
where
    A: Grid + ?Sized,
    B: Grid + ?Sized,
{
    let mut severities = BTreeMap::new();
    for (i, row_pair) in row_mapping.iter().enumerate() {
        let out_row = data_start_row + i;
        for (j, col_pair) in column_mapping.iter().enumerate() {
            let out_col = j + 1;
            let verdict = classify(
                a.cell(row_pair.source_a, col_pair.source_a),
                b.cell(row_pair.source_b, col_pair.source_b),
                &options.classifier,
            );
            writer.set_cell_value(sheet, out_row, out_col, verdict.diff.into());
            writer.set_cell_severity(sheet, out_row, out_col, verdict.severity);
            *severities.entry(verdict.severity).or_insert(0) += 1;

            let style = a
                .style(row_pair.source_a, col_pair.source_a)
                .or_else(|| b.style(row_pair.source_b, col_pair.source_b));
            if let Some(style) = style {
                writer.copy_style(sheet, out_row, out_col, style);
            }
        }
    }
    severities
}

fn carry_dimensions<A, B>(
    writer: &mut dyn WorkbookWriter,
    sheet: SheetHandle,
    a: &A,
    b: &B,
    row_mapping: &[MappingEntry],
    column_mapping: &[MappingEntry],
    data_start_row: usize,
) where
    A: Grid + ?Sized,
    B: Grid + ?Sized,
{
    for (j, col_pair) in column_mapping.iter().enumerate() {
        let width = a
            .column_width(col_pair.source_a)
            .or_else(|| b.column_width(col_pair.source_b));
        if let Some(width) = width {
            writer.copy_column_width(sheet, j + 1, width);
        }
    }
    for (i, row_pair) in row_mapping.iter().enumerate() {
        let height = a
            .row_height(row_pair.source_a)
            .or_else(|| b.row_height(row_pair.source_b));
        if let Some(height) = height {
            writer.copy_row_height(sheet, data_start_row + i, height);
        }
    }
}
