use sheetdiff_core::{
    MemoryWorkbook, SheetOutcome, SkipReason, SourceSide, diff_sheet, diff_workbooks,
};
use sheetdiff_model::{
    CellValue, DiffOptions, Grid, KeySelection, MappingEntry, MemoryGrid, Severity, Sheet,
    StyleId, Workbook,
};

fn text(value: &str) -> CellValue {
    CellValue::text(value)
}

fn num(value: f64) -> CellValue {
    CellValue::Number(value)
}

fn letters(values: [f64; 3]) -> MemoryGrid {
    MemoryGrid::from_rows(vec![
        vec![text("A"), num(values[0])],
        vec![text("B"), num(values[1])],
        vec![text("C"), num(values[2])],
    ])
}

fn run(a: &MemoryGrid, b: &MemoryGrid, options: &DiffOptions) -> (SheetOutcome, MemoryWorkbook) {
    let mut out = MemoryWorkbook::new();
    let outcome = diff_sheet("Sheet1", a, b, options, &mut out);
    (outcome, out)
}

#[test]
fn letter_rows_produce_expected_second_column() {
    let a = letters([1.0, 2.0, 3.0]);
    let b = letters([1.0, 5.0, 3.0]);
    let (outcome, out) = run(&a, &b, &DiffOptions::default());

    let summary = outcome.summary().expect("sheet compared");
    let rows: Vec<(usize, usize)> = summary
        .row_mapping
        .iter()
        .map(|entry| (entry.source_a, entry.source_b))
        .collect();
    assert_eq!(rows, vec![(1, 1), (2, 2), (3, 3)]);
    assert_eq!(summary.data_start_row, 7 + 3 + 2);

    let sheet = out.sheet("Sheet1").expect("output sheet");
    let start = summary.data_start_row;
    let diffs: Vec<&CellValue> = (0..3).map(|i| sheet.cell(start + i, 2)).collect();
    assert_eq!(diffs, vec![&num(0.0), &num(3.0), &num(0.0)]);
    let severities: Vec<Option<Severity>> =
        (0..3).map(|i| sheet.severity(start + i, 2)).collect();
    assert_eq!(
        severities,
        vec![
            Some(Severity::Match),
            Some(Severity::Minor),
            Some(Severity::Match)
        ]
    );
    assert_eq!(summary.severity_count(Severity::Minor), 1);
    assert_eq!(summary.difference_count(), 1);
}

#[test]
fn mapping_tables_carry_source_a_keys() {
    let a = MemoryGrid::from_rows(vec![
        vec![text("Region"), text("Revenue"), text("Cost")],
        vec![text("North"), num(10.0), num(4.0)],
        vec![text("South"), num(20.0), num(8.0)],
    ]);
    let b = MemoryGrid::from_rows(vec![
        vec![text("Region"), text("Cost"), text("Revenue")],
        vec![text("south"), num(9.0), num(20.0)],
        vec![text("NORTH"), num(4.0), num(12.0)],
    ]);
    let (outcome, out) = run(&a, &b, &DiffOptions::default());
    let summary = outcome.summary().expect("sheet compared");

    assert_eq!(
        summary.row_mapping[1],
        MappingEntry {
            source_a: 2,
            source_b: 3,
            key: text("North"),
        }
    );
    let columns: Vec<(usize, usize)> = summary
        .column_mapping
        .iter()
        .map(|entry| (entry.source_a, entry.source_b))
        .collect();
    assert_eq!(columns, vec![(1, 1), (2, 3), (3, 2)]);

    let sheet = out.sheet("Sheet1").expect("output sheet");
    let start = summary.data_start_row;
    // North revenue 10 -> 12, south cost 8 -> 9.
    assert_eq!(sheet.cell(start + 1, 2), &num(2.0));
    assert_eq!(sheet.cell(start + 2, 3), &num(1.0));
    // Keys compare as text after normalization only for matching, not output.
    assert_eq!(sheet.cell(start + 1, 1), &text("North <--> NORTH"));
    assert_eq!(sheet.severity(start + 1, 1), Some(Severity::TextMismatch));
}

#[test]
fn disjoint_keys_are_skipped_without_output() {
    let a = MemoryGrid::from_rows(vec![
        vec![text("revenue"), num(1.0)],
        vec![text("gross profit"), num(2.0)],
    ]);
    let b = MemoryGrid::from_rows(vec![
        vec![text("headcount"), num(1.0)],
        vec![text("office space"), num(2.0)],
    ]);
    let (outcome, out) = run(&a, &b, &DiffOptions::default());

    match outcome {
        SheetOutcome::Skipped(skipped) => {
            assert_eq!(skipped.reason, SkipReason::NoRowMatches);
            assert_eq!(skipped.rows.keyed_a, 2);
            assert_eq!(skipped.rows.keyed_b, 2);
            assert_eq!(skipped.rows.matched, 0);
        }
        SheetOutcome::Compared(_) => panic!("expected a skip"),
    }
    assert!(out.is_empty());
}

#[test]
fn auto_detection_finds_header_row() {
    let grid = MemoryGrid::from_rows(vec![
        vec![num(0.0), text("Jan"), text("Feb")],
        vec![num(1.0), num(10.0), num(11.0)],
        vec![num(2.0), num(20.0), num(21.0)],
    ]);
    let options = DiffOptions::default()
        .with_key_row(KeySelection::Auto)
        .with_key_column(KeySelection::Auto);
    let (outcome, _) = run(&grid, &grid, &options);
    let summary = outcome.summary().expect("sheet compared");
    assert_eq!(summary.keys.row_a, 1);
    assert_eq!(summary.keys.row_b, 1);
    // Columns 2 and 3 tie on one text cell each; the lowest wins.
    assert_eq!(summary.keys.column_a, 2);
}

#[test]
fn styles_and_dimensions_follow_matched_indices() {
    let mut a = letters([1.0, 2.0, 3.0]);
    a.set_style(2, 2, StyleId(7));
    a.set_column_width(2, 18.5);
    a.set_row_height(3, 30.0);
    let mut b = letters([1.0, 2.0, 3.0]);
    b.set_style(1, 1, StyleId(3));
    b.set_column_width(1, 9.0);

    let (outcome, out) = run(&a, &b, &DiffOptions::default());
    let summary = outcome.summary().expect("sheet compared");
    let start = summary.data_start_row;
    let sheet = out.sheet("Sheet1").expect("output sheet");

    assert_eq!(sheet.style(start + 1, 2), Some(StyleId(7)));
    assert_eq!(sheet.style(start, 1), Some(StyleId(3)));
    assert_eq!(sheet.style(start + 2, 2), None);
    assert_eq!(sheet.column_width(1), Some(9.0));
    assert_eq!(sheet.column_width(2), Some(18.5));
    assert_eq!(sheet.row_height(start + 2), Some(30.0));
    assert_eq!(sheet.row_height(start), None);
}

#[test]
fn missing_sheets_are_warned_and_siblings_continue() {
    let a = Workbook::new(vec![
        Sheet::new("Only A", letters([1.0, 2.0, 3.0])),
        Sheet::new("Shared", letters([1.0, 2.0, 3.0])),
    ]);
    let b = Workbook::new(vec![
        Sheet::new("Shared", letters([1.0, 2.0, 4.0])),
        Sheet::new("Only B", letters([1.0, 2.0, 3.0])),
    ]);
    let mut out = MemoryWorkbook::new();
    let report = diff_workbooks(
        &a,
        &b,
        &DiffOptions::default(),
        &mut out,
    );

    let names: Vec<&str> = report.outcomes.iter().map(SheetOutcome::name).collect();
    assert_eq!(names, vec!["Only A", "Shared", "Only B"]);
    assert_eq!(report.compared_count(), 1);
    assert_eq!(report.skipped_count(), 2);
    assert_eq!(report.warnings.len(), 2);
    assert_eq!(
        report.warnings[0].to_string(),
        "sheet 'Only A' not found in second input"
    );
    match report.outcome("Only B") {
        Some(SheetOutcome::Skipped(skipped)) => assert_eq!(
            skipped.reason,
            SkipReason::MissingInSource(SourceSide::Second)
        ),
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(out.sheets().len(), 1);
    assert_eq!(report.difference_count(), 1);
    assert_eq!(report.severity_totals().get(&Severity::Match), Some(&5));
}

#[test]
fn report_serializes_outcomes_with_status_tags() {
    let a = Workbook::new(vec![Sheet::new("Shared", letters([1.0, 2.0, 3.0]))]);
    let mut out = MemoryWorkbook::new();
    let report = diff_workbooks(
        &a,
        &a,
        &DiffOptions::default(),
        &mut out,
    );
    let json = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(json["strategy"], "greedy");
    assert_eq!(json["outcomes"][0]["status"], "compared");
    assert_eq!(json["outcomes"][0]["severities"]["match"], 6);
}

#[test]
fn similarity_threshold_from_options_drives_alignment() {
    let a = MemoryGrid::from_rows(vec![
        vec![text("Line"), text("Amount")],
        vec![text("total operating revenue q1"), num(10.0)],
    ]);
    let b = MemoryGrid::from_rows(vec![
        vec![text("Line"), text("Amount")],
        vec![text("total operating revenue q2"), num(12.0)],
    ]);
    let workbook_a = Workbook::new(vec![Sheet::new("Revenue", a)]);
    let workbook_b = Workbook::new(vec![Sheet::new("Revenue", b)]);

    let mut strict_out = MemoryWorkbook::new();
    let strict = diff_workbooks(
        &workbook_a,
        &workbook_b,
        &DiffOptions::default(),
        &mut strict_out,
    );
    let summary = strict.compared().next().expect("sheet compared");
    assert_eq!(summary.rows.fuzzy, 0);
    assert_eq!(summary.rows.matched, 1);

    // 3 shared tokens of 5 distinct scores 0.6.
    let options = DiffOptions::default().with_similarity_threshold(0.6);
    let mut loose_out = MemoryWorkbook::new();
    let loose = diff_workbooks(&workbook_a, &workbook_b, &options, &mut loose_out);
    assert_eq!(loose.options.align.similarity_threshold, 0.6);
    let summary = loose.compared().next().expect("sheet compared");
    assert_eq!(summary.rows.fuzzy, 1);
    assert_eq!(summary.rows.matched, 2);
    assert_eq!(summary.difference_count(), 2);

    let json = serde_json::to_value(&loose).expect("serialize report");
    assert_eq!(json["options"]["align"]["similarity_threshold"], 0.6);
}
