//! Integration tests for the diff pipeline.

use std::fs;
use std::path::Path;

use sheetdiff_cli::pipeline::{DiffRequest, REPORT_FILENAME, detect_keys, run_diff};
use sheetdiff_model::{DiffOptions, KeySelection};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn request(first: &Path, second: &Path, out: &Path) -> DiffRequest {
    DiffRequest {
        file1: first.to_path_buf(),
        file2: second.to_path_buf(),
        output_dir: out.to_path_buf(),
        options: DiffOptions::default(),
        write_report: true,
    }
}

#[test]
fn test_diff_directories_end_to_end() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("before");
    let second = dir.path().join("after");
    fs::create_dir_all(&first).unwrap();
    fs::create_dir_all(&second).unwrap();
    write(&first, "Sales.csv", "Region,Q1,Q2\nNorth,10,20\nSouth,5,7\n");
    write(&second, "Sales.csv", "Region,Q2,Q1\nSouth,7,6\nNorth,20,10\nWest,1,1\n");
    write(&first, "Legacy.csv", "x,y\n1,2\n");

    let out = dir.path().join("diff");
    let run = run_diff(&request(&first, &second, &out)).unwrap();

    assert_eq!(run.report.compared_count(), 1);
    assert_eq!(run.report.skipped_count(), 1);
    assert_eq!(run.sheet_files, vec![out.join("Sales.csv")]);
    assert_eq!(run.report_file, Some(out.join(REPORT_FILENAME)));
    assert!(out.join(REPORT_FILENAME).exists());

    let text = fs::read_to_string(out.join("Sales.csv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    // 3 row pairs and 3 column pairs: data starts at row 7 + 3 + 3.
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[12], "Region,Q1,Q2,");
    assert_eq!(lines[13], "North,0,0,");
    assert_eq!(lines[14], "South,1,0,");
}

#[test]
fn test_single_files_are_paired_whatever_their_names() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "old.csv", "k,v\nx,1\n");
    write(dir.path(), "new.csv", "k,v\nx,2\n");
    let out = dir.path().join("out");
    let mut req = request(&dir.path().join("old.csv"), &dir.path().join("new.csv"), &out);
    req.write_report = false;

    let run = run_diff(&req).unwrap();
    assert!(run.report_file.is_none());
    assert!(!out.join(REPORT_FILENAME).exists());
    assert!(run.report.warnings.is_empty());
    assert_eq!(run.report.compared_count(), 1);
    assert_eq!(run.report.difference_count(), 1);
    assert_eq!(run.sheet_files, vec![out.join("old.csv")]);
}

#[test]
fn test_directory_sheets_still_pair_by_name() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("one");
    let second = dir.path().join("two");
    fs::create_dir_all(&first).unwrap();
    fs::create_dir_all(&second).unwrap();
    write(&first, "Alpha.csv", "k,v\nx,1\n");
    write(&second, "Beta.csv", "k,v\nx,2\n");

    let run = run_diff(&request(&first, &second, &dir.path().join("out"))).unwrap();
    assert_eq!(run.report.compared_count(), 0);
    assert_eq!(run.report.warnings.len(), 2);
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.csv", "k\n");
    let err = run_diff(&request(
        &dir.path().join("a.csv"),
        &dir.path().join("missing.csv"),
        &dir.path().join("out"),
    ))
    .unwrap_err();
    assert!(err.to_string().contains("file not found"));
}

#[test]
fn test_auto_keys_through_pipeline() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("one");
    let second = dir.path().join("two");
    fs::create_dir_all(&first).unwrap();
    fs::create_dir_all(&second).unwrap();
    write(&first, "Book.csv", "1,Name,Score\n2,Ann,10\n3,Bob,20\n");
    write(&second, "Book.csv", "1,Name,Score\n2,Bob,25\n3,Ann,10\n");

    let mut req = request(&first, &second, &dir.path().join("out"));
    req.options = DiffOptions::default().with_key_column(KeySelection::Auto);
    let run = run_diff(&req).unwrap();

    let summary = run.report.compared().next().unwrap();
    assert_eq!(summary.keys.column_a, 2);
    assert_eq!(summary.rows.matched, 3);
    assert_eq!(summary.difference_count(), 3);
}

#[test]
fn test_detect_keys_per_sheet() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Left.csv", "Name,Jan,Feb\nAnn,1,2\n");
    write(dir.path(), "Right.csv", "1,2\n3,label\n");

    let keys = detect_keys(dir.path()).unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0].sheet, "Left");
    assert_eq!((keys[0].key_row, keys[0].key_column), (1, 1));
    assert_eq!((keys[0].rows, keys[0].columns), (2, 3));
    assert_eq!(keys[1].sheet, "Right");
    assert_eq!((keys[1].key_row, keys[1].key_column), (2, 2));
}
