//! Workbook-level diff: every same-named sheet pair in order.

use std::collections::BTreeMap;

use serde::Serialize;
use sheetdiff_map::{AlignmentStrategy, GreedyAligner};
use sheetdiff_model::{DiffOptions, Grid, Severity, Workbook, WorkbookWriter};
use tracing::{info, warn};

use crate::assemble::{
    AxisCounts, SheetOutcome, SheetSummary, SkipReason, SkippedSheet, SourceSide, diff_sheet,
};

/// Non-fatal conditions met while diffing a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffWarning {
    SheetMissing { sheet: String, present_in: SourceSide },
}

impl std::fmt::Display for DiffWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SheetMissing {
                sheet,
                present_in: SourceSide::First,
            } => write!(f, "sheet '{sheet}' not found in second input"),
            Self::SheetMissing {
                sheet,
                present_in: SourceSide::Second,
            } => write!(f, "sheet '{sheet}' not found in first input"),
        }
    }
}

/// Everything a workbook diff produced besides the output sheets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkbookReport {
    pub strategy: String,
    pub options: DiffOptions,
    pub outcomes: Vec<SheetOutcome>,
    pub warnings: Vec<DiffWarning>,
}

impl WorkbookReport {
    pub fn compared(&self) -> impl Iterator<Item = &SheetSummary> + '_ {
        self.outcomes.iter().filter_map(SheetOutcome::summary)
    }

    pub fn compared_count(&self) -> usize {
        self.compared().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.compared_count()
    }

    pub fn difference_count(&self) -> usize {
        self.compared().map(SheetSummary::difference_count).sum()
    }

    /// Cell counts per severity across every compared sheet.
    pub fn severity_totals(&self) -> BTreeMap<Severity, usize> {
        let mut totals = BTreeMap::new();
        for summary in self.compared() {
            for (severity, count) in &summary.severities {
                *totals.entry(*severity).or_insert(0) += count;
            }
        }
        totals
    }

    pub fn outcome(&self, sheet: &str) -> Option<&SheetOutcome> {
        self.outcomes.iter().find(|outcome| outcome.name() == sheet)
    }
}

/// Diffs every sheet of `a` against the same-named sheet of `b`.
///
/// Sheets are visited in `a`'s order, then sheets only `b` has. A sheet
/// missing on either side is warned about and skipped; the rest continue.
/// The report records the options every sheet was aligned with.
pub fn diff_workbooks<G: Grid>(
    a: &Workbook<G>,
    b: &Workbook<G>,
    options: &DiffOptions,
    writer: &mut dyn WorkbookWriter,
) -> WorkbookReport {
    let strategy = GreedyAligner::from_options(&options.align);
    let mut outcomes = Vec::with_capacity(a.len());
    let mut warnings = Vec::new();

    for sheet in &a.sheets {
        match b.sheet(&sheet.name) {
            Some(other) => {
                outcomes.push(diff_sheet(
                    &sheet.name,
                    &sheet.grid,
                    &other.grid,
                    options,
                    writer,
                ));
            }
            None => {
                record_missing(&sheet.name, SourceSide::First, &mut outcomes, &mut warnings);
            }
        }
    }
    for sheet in &b.sheets {
        if a.sheet(&sheet.name).is_none() {
            record_missing(&sheet.name, SourceSide::Second, &mut outcomes, &mut warnings);
        }
    }

    let report = WorkbookReport {
        strategy: strategy.name().to_string(),
        options: *options,
        outcomes,
        warnings,
    };
    info!(
        sheets = report.outcomes.len(),
        compared = report.compared_count(),
        skipped = report.skipped_count(),
        differences = report.difference_count(),
        "workbook diff complete"
    );
    report
}

fn record_missing(
    name: &str,
    present_in: SourceSide,
    outcomes: &mut Vec<SheetOutcome>,
    warnings: &mut Vec<DiffWarning>,
) {
    let warning = DiffWarning::SheetMissing {
        sheet: name.to_string(),
        present_in,
    };
    warn!(sheet = %name, "{warning}");
    warnings.push(warning);
    outcomes.push(SheetOutcome::Skipped(SkippedSheet {
        name: name.to_string(),
        reason: SkipReason::MissingInSource(present_in),
        rows: AxisCounts::default(),
        columns: AxisCounts::default(),
    }));
}
