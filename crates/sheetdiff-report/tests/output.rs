use sheetdiff_core::{MemoryWorkbook, WorkbookReport, diff_workbooks};
use sheetdiff_model::{CellValue, DiffOptions, MemoryGrid, Sheet, Workbook};
use sheetdiff_report::{
    CHANGE_FILL, MATCH_FILL, render_json_report, sheet_to_csv, write_csv_sheets,
    write_json_report,
};
use tempfile::TempDir;

fn letters(values: [f64; 3]) -> MemoryGrid {
    MemoryGrid::from_rows(
        [("A", values[0]), ("B", values[1]), ("C", values[2])]
            .into_iter()
            .map(|(key, value)| vec![CellValue::text(key), CellValue::Number(value)]),
    )
}

fn diffed() -> (WorkbookReport, MemoryWorkbook) {
    let a = Workbook::new(vec![
        Sheet::new("Totals", letters([1.0, 2.0, 3.0])),
        Sheet::new("Retired", letters([1.0, 1.0, 1.0])),
    ]);
    let b = Workbook::new(vec![Sheet::new("Totals", letters([1.0, 5.0, 3.0]))]);
    let mut out = MemoryWorkbook::new();
    let report = diff_workbooks(
        &a,
        &b,
        &DiffOptions::default(),
        &mut out,
    );
    (report, out)
}

#[test]
fn csv_sheet_lays_out_mapping_tables_then_data() {
    let (_, out) = diffed();
    let sheet = out.sheet("Totals").expect("output sheet");
    let csv = sheet_to_csv(sheet).expect("render csv");
    insta::assert_snapshot!(csv.trim_end(), @r"
    Row Mapping (File1 -> File2),File1 Row,File2 Row,Key Value
    ,1,1,A
    ,2,2,B
    ,3,3,C
    ,,,
    Column Mapping (File1 -> File2),File1 Column,File2 Column,Key Value
    ,1,1,A
    ,2,2,1
    ,,,
    ==================================================,,,
    ,,,
    A,0,,
    B,3,,
    C,0,,
    ");
}

#[test]
fn csv_files_are_written_per_output_sheet() {
    let (_, out) = diffed();
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("diff");

    let written = write_csv_sheets(&target, &out).unwrap();
    assert_eq!(written, vec![target.join("Totals.csv")]);
    let text = std::fs::read_to_string(&written[0]).unwrap();
    assert!(text.starts_with("Row Mapping (File1 -> File2),"));
    assert!(!target.join("Retired.csv").exists());
}

#[test]
fn json_report_carries_outcomes_and_fills() {
    let (report, out) = diffed();
    let json: serde_json::Value =
        serde_json::from_str(&render_json_report(&report, &out).unwrap()).unwrap();

    assert_eq!(json["tool"], "sheetdiff");
    assert_eq!(json["summary"]["compared"], 1);
    assert_eq!(json["summary"]["skipped"], 1);
    assert_eq!(json["summary"]["differences"], 1);

    let outcomes = json["outcomes"].as_array().unwrap();
    assert_eq!(outcomes[0]["status"], "compared");
    assert_eq!(outcomes[0]["row_mapping"][1]["source_b"], 2);
    assert_eq!(outcomes[1]["status"], "skipped");
    assert_eq!(outcomes[1]["reason"]["kind"], "missing_in_source");
    assert_eq!(outcomes[1]["reason"]["present_in"], "first");
    assert_eq!(json["warnings"][0]["kind"], "sheet_missing");

    let cells = json["sheets"][0]["cells"].as_array().unwrap();
    let changed = cells
        .iter()
        .find(|cell| cell["row"] == 13 && cell["col"] == 2)
        .expect("data cell");
    assert_eq!(changed["severity"], "minor");
    assert_eq!(changed["fill"], CHANGE_FILL);
    assert_eq!(changed["value"]["kind"], "number");
    assert_eq!(changed["value"]["value"], 3.0);

    let header = cells
        .iter()
        .find(|cell| cell["row"] == 1 && cell["col"] == 1)
        .expect("header cell");
    assert!(header.get("severity").is_none());

    let matched = cells
        .iter()
        .find(|cell| cell["row"] == 12 && cell["col"] == 1)
        .expect("key cell");
    assert_eq!(matched["fill"], MATCH_FILL);
}

#[test]
fn json_report_is_written_to_disk() {
    let (report, out) = diffed();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");
    write_json_report(&path, &report, &out).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"strategy\": \"greedy\""));
}
