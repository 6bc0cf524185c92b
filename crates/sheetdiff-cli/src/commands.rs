use std::path::PathBuf;

use anyhow::{Context, Result};
use sheetdiff_cli::pipeline::{DiffRequest, DiffRun, SheetKeys, detect_keys, run_diff};
use sheetdiff_cli::state::{SessionState, StateStore};
use sheetdiff_model::{DiffOptions, KeySelection};
use tracing::info;

use crate::cli::{DiffArgs, KeysArgs, LastArgs};

pub fn run_diff_command(args: &DiffArgs) -> Result<DiffRun> {
    let options = DiffOptions::new()
        .with_key_column(KeySelection::from_index(args.key_column))
        .with_key_row(KeySelection::from_index(args.key_row))
        .with_similarity_threshold(args.threshold)
        .with_major_threshold(args.major_threshold);
    info!(
        key_column = %options.key_column,
        key_row = %options.key_row,
        threshold = args.threshold,
        major_threshold = args.major_threshold,
        "diff options"
    );

    let run = run_diff(&DiffRequest {
        file1: args.file1.clone(),
        file2: args.file2.clone(),
        output_dir: args.output_dir.clone(),
        options,
        write_report: !args.no_report,
    })?;

    if args.remember {
        let store = StateStore::resolve(args.state_file.as_deref()).context("locate session file")?;
        store
            .save(&SessionState {
                file1_path: Some(absolute(&args.file1)),
                file2_path: Some(absolute(&args.file2)),
                output_path: Some(absolute(&args.output_dir)),
                key_column: args.key_column,
                key_row: args.key_row,
                saved_at: None,
            })
            .with_context(|| format!("save session to {}", store.path().display()))?;
    }
    Ok(run)
}

pub fn run_keys(args: &KeysArgs) -> Result<Vec<SheetKeys>> {
    detect_keys(&args.input)
}

pub fn run_last(args: &LastArgs) -> Result<(PathBuf, SessionState)> {
    let store = StateStore::resolve(args.state_file.as_deref()).context("locate session file")?;
    let state = store.load();
    Ok((store.path().to_path_buf(), state))
}

fn absolute(path: &std::path::Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
