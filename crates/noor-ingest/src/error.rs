//! Error types for export reading and output writing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output exists and overwriting was not requested.
    #[error("output file already exists: {path} (pass --overwrite to replace it)")]
    OutputExists { path: PathBuf },

    #[error("unsupported output extension for {path}; expected .csv")]
    UnsupportedExtension { path: PathBuf },

    // === CSV Errors ===
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    #[error("failed to write CSV {path}: {message}")]
    CsvWrite { path: PathBuf, message: String },

    #[error("export has no header row: {path}")]
    EmptyCsv { path: PathBuf },

    // === Spreadsheet Errors ===
    #[error("failed to read spreadsheet {path}: {message}")]
    SpreadsheetRead { path: PathBuf, message: String },

    /// None of a required field's header aliases is present.
    #[error("cannot find a column for '{field}' in {path}; expected one of: {aliases}")]
    MissingColumn {
        field: &'static str,
        aliases: String,
        path: PathBuf,
    },

    // === DataFrame Errors ===
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
