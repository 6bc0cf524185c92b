//! CLI argument definitions for sheetdiff.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sheetdiff_model::{DEFAULT_MAJOR_THRESHOLD, DEFAULT_SIMILARITY_THRESHOLD};

#[derive(Parser)]
#[command(
    name = "sheetdiff",
    version,
    about = "Compare two spreadsheets whose rows and columns may not line up",
    long_about = "Compare two spreadsheets whose rows and columns may not line up.\n\n\
                  Rows are matched by a key column and columns by a key row, first\n\
                  exactly and then by word overlap. Every matched cell is written as\n\
                  a difference with a severity."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Diff two workbooks (a CSV file or a directory of CSV files each).
    Diff(DiffArgs),

    /// Show the detected key row and key column of every sheet.
    Keys(KeysArgs),

    /// Show the remembered session.
    Last(LastArgs),
}

#[derive(Parser)]
pub struct DiffArgs {
    /// First (reference) workbook.
    #[arg(value_name = "FILE1")]
    pub file1: PathBuf,

    /// Second workbook.
    #[arg(value_name = "FILE2")]
    pub file2: PathBuf,

    /// Directory receiving one CSV per compared sheet.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Column holding the row keys (1-based, 0 = auto-detect).
    #[arg(long = "key-column", value_name = "N", default_value_t = 1)]
    pub key_column: usize,

    /// Row holding the column keys (1-based, 0 = auto-detect).
    #[arg(long = "key-row", value_name = "N", default_value_t = 1)]
    pub key_row: usize,

    /// Minimum word-overlap score for a fuzzy key match.
    #[arg(
        long = "threshold",
        value_name = "F",
        default_value_t = DEFAULT_SIMILARITY_THRESHOLD,
        value_parser = parse_unit_interval
    )]
    pub threshold: f64,

    /// Numeric differences larger than this are major.
    #[arg(
        long = "major-threshold",
        value_name = "F",
        default_value_t = DEFAULT_MAJOR_THRESHOLD,
        value_parser = parse_non_negative
    )]
    pub major_threshold: f64,

    /// Skip the JSON report.
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// Remember paths and key settings for `sheetdiff last`.
    #[arg(long = "remember")]
    pub remember: bool,

    /// Session file (default: platform config folder).
    #[arg(long = "state-file", value_name = "PATH")]
    pub state_file: Option<PathBuf>,
}

#[derive(Parser)]
pub struct KeysArgs {
    /// Workbook to inspect.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Parser)]
pub struct LastArgs {
    /// Session file (default: platform config folder).
    #[arg(long = "state-file", value_name = "PATH")]
    pub state_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_unit_interval(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|_| format!("'{raw}' is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside 0.0..=1.0"))
    }
}

fn parse_non_negative(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|_| format!("'{raw}' is not a number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} must be a finite number >= 0"))
    }
}
