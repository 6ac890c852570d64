//! Command-line arguments for `noor-queue`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use noor_model::RecencyOrder;

#[derive(Parser)]
#[command(
    name = "noor-queue",
    version,
    about = "Normalize Noor hospital queue exports into importable patient records",
    long_about = "Normalize Noor hospital queue exports into importable patient records.\n\n\
                  Dates are resolved from Jalali or Gregorian input, names are split and\n\
                  gendered, and records are deduplicated by national ID. Rows that cannot\n\
                  be imported are written to sibling files next to the cleaned output."
)]
pub struct Cli {
    /// CSV or spreadsheet exports to normalize; several files are merged in the given order.
    #[arg(value_name = "EXPORT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Cleaned output path (default: <STEM>_cleaned.csv, or merged_cleaned.csv).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Replace output files that already exist.
    #[arg(long = "overwrite")]
    pub overwrite: bool,

    /// How the most recent record of a patient is chosen.
    #[arg(long = "recency", value_enum, default_value = "visit-date")]
    pub recency: RecencyArg,

    /// Do not copy gender from the record that supplied a missing first name.
    #[arg(long = "no-inherit-gender")]
    pub no_inherit_gender: bool,

    /// Tag stamped on every record (repeatable; replaces the defaults).
    #[arg(long = "base-tag", value_name = "TAG")]
    pub base_tags: Vec<String>,

    /// Full name treated as a placeholder (repeatable; replaces the defaults).
    #[arg(long = "placeholder-name", value_name = "NAME")]
    pub placeholder_names: Vec<String>,

    /// Directory holding name and tag lookup files (default: $NOOR_LOOKUP_DIR).
    #[arg(long = "lookup-dir", value_name = "DIR")]
    pub lookup_dir: Option<PathBuf>,

    /// Normalize and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Allow patient values (national IDs, names) in trace logs.
    #[arg(long = "log-data")]
    pub log_data: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RecencyArg {
    /// Latest visit date wins.
    VisitDate,
    /// Later rows win.
    InputOrder,
}

impl From<RecencyArg> for RecencyOrder {
    fn from(value: RecencyArg) -> Self {
        match value {
            RecencyArg::VisitDate => Self::VisitDate,
            RecencyArg::InputOrder => Self::InputOrder,
        }
    }
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
