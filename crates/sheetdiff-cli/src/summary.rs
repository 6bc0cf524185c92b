use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use sheetdiff_cli::pipeline::{DiffRun, SheetKeys};
use sheetdiff_cli::state::SessionState;
use sheetdiff_core::SheetOutcome;
use sheetdiff_model::{KeySelection, Severity};

pub fn print_diff_summary(run: &DiffRun) {
    println!("Output: {}", run.output_dir.display());
    if let Some(path) = &run.report_file {
        println!("Report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Fuzzy"),
        header_cell("Minor"),
        header_cell("Major"),
        header_cell("Text"),
        header_cell("One-sided"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=8 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for outcome in &run.report.outcomes {
        match outcome {
            SheetOutcome::Compared(summary) => {
                table.add_row(vec![
                    Cell::new(&summary.name)
                        .fg(Color::Blue)
                        .add_attribute(Attribute::Bold),
                    Cell::new("compared").fg(Color::Green),
                    matched_cell(summary.rows.matched, summary.rows.keyed_a),
                    matched_cell(summary.columns.matched, summary.columns.keyed_a),
                    count_cell(summary.rows.fuzzy + summary.columns.fuzzy, Color::Yellow),
                    count_cell(summary.severity_count(Severity::Minor), Color::Yellow),
                    count_cell(summary.severity_count(Severity::Major), Color::Red),
                    count_cell(summary.severity_count(Severity::TextMismatch), Color::Red),
                    count_cell(summary.severity_count(Severity::OneSided), Color::Yellow),
                ]);
            }
            SheetOutcome::Skipped(skipped) => {
                table.add_row(vec![
                    Cell::new(&skipped.name).fg(Color::DarkGrey),
                    Cell::new(format!("skipped: {}", skipped.reason)).fg(Color::Yellow),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                ]);
            }
        }
    }

    let totals = run.report.severity_totals();
    let total = |severity: Severity| totals.get(&severity).copied().unwrap_or(0);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} compared, {} skipped",
            run.report.compared_count(),
            run.report.skipped_count()
        ))
        .fg(Color::Cyan),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(total(Severity::Minor), Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(total(Severity::Major), Color::Red).add_attribute(Attribute::Bold),
        count_cell(total(Severity::TextMismatch), Color::Red).add_attribute(Attribute::Bold),
        count_cell(total(Severity::OneSided), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !run.report.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &run.report.warnings {
            eprintln!("- {warning}");
        }
    }
}

pub fn print_keys(keys: &[SheetKeys]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Key row"),
        header_cell("Key column"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for sheet in keys {
        table.add_row(vec![
            Cell::new(&sheet.sheet),
            Cell::new(sheet.key_row),
            Cell::new(sheet.key_column),
            dim_cell(sheet.rows),
            dim_cell(sheet.columns),
        ]);
    }
    println!("{table}");
}

pub fn print_session(path: &Path, state: &SessionState) {
    println!("Session: {}", path.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("File 1"), path_cell(state.file1_path.as_deref())]);
    table.add_row(vec![Cell::new("File 2"), path_cell(state.file2_path.as_deref())]);
    table.add_row(vec![Cell::new("Output"), path_cell(state.output_path.as_deref())]);
    table.add_row(vec![
        Cell::new("Key column"),
        Cell::new(KeySelection::from_index(state.key_column)),
    ]);
    table.add_row(vec![
        Cell::new("Key row"),
        Cell::new(KeySelection::from_index(state.key_row)),
    ]);
    table.add_row(vec![
        Cell::new("Saved"),
        match state.saved_at {
            Some(at) => Cell::new(at.format("%Y-%m-%d %H:%M:%S UTC")),
            None => dim_cell("never"),
        },
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn matched_cell(matched: usize, keyed: usize) -> Cell {
    let cell = Cell::new(format!("{matched}/{keyed}"));
    if matched < keyed {
        cell.fg(Color::Yellow)
    } else {
        cell
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn path_cell(path: Option<&Path>) -> Cell {
    match path {
        Some(path) => Cell::new(path.display()),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
