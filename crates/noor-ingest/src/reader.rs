//! Export reading into [`RawRow`]s.
//!
//! Every column is read as a string (`infer_schema_length = 0`) so national
//! IDs keep their leading zeros and dates are never reinterpreted by Polars.
//! Spreadsheet exports are routed by extension to [`read_spreadsheet`].

use std::path::{Path, PathBuf};

use noor_model::RawRow;
use noor_model::text::is_blank;
use polars::prelude::*;
use tracing::{debug, info};

use crate::columns::{ColumnMap, NameSource};
use crate::error::{IngestError, Result};
use crate::spreadsheet::{is_spreadsheet, read_spreadsheet};

/// Converts a Polars cell to text; null becomes empty.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Reads one export file.
pub fn read_export(path: &Path) -> Result<Vec<RawRow>> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let df = read_frame(path)?;
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let columns = ColumnMap::resolve(&headers, path)?;
    let rows = rows_from_frame(&df, &columns)?;
    debug!(path = %path.display(), rows = rows.len(), "export read");
    Ok(rows)
}

/// Reads several exports and concatenates them in the given order.
pub fn read_exports<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RawRow>> {
    let mut rows = Vec::new();
    for path in paths {
        rows.extend(read_export(path.as_ref())?);
    }
    info!(files = paths.len(), rows = rows.len(), "exports loaded");
    Ok(rows)
}

fn read_frame(path: &Path) -> Result<DataFrame> {
    if is_spreadsheet(path) {
        return read_spreadsheet(path);
    }
    let parse_error = |e: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)
}

fn rows_from_frame(df: &DataFrame, columns: &ColumnMap) -> Result<Vec<RawRow>> {
    let cell = |name: &str, idx: usize| -> Result<String> {
        Ok(any_to_string(df.column(name)?.get(idx)?))
    };
    let optional = |name: Option<&String>, idx: usize| -> Result<Option<String>> {
        let Some(name) = name else {
            return Ok(None);
        };
        let value = cell(name, idx)?;
        Ok((!is_blank(&value)).then_some(value))
    };

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let full_name = match &columns.name {
            NameSource::FullName(name) => cell(name, idx)?,
            NameSource::Split { first, last } => {
                let first = cell(first, idx)?;
                let last = cell(last, idx)?;
                format!("{} {}", first.trim(), last.trim())
                    .trim()
                    .to_string()
            }
        };
        rows.push(RawRow {
            national_id: cell(&columns.national_id, idx)?,
            full_name,
            mobile: optional(Some(&columns.mobile), idx)?,
            visit_date: optional(columns.visit_date.as_ref(), idx)?,
            status: optional(columns.status.as_ref(), idx)?,
            appointment_type: optional(columns.appointment_type.as_ref(), idx)?,
            clinic: optional(columns.clinic.as_ref(), idx)?,
            tags: optional(columns.tags.as_ref(), idx)?,
        });
    }
    Ok(rows)
}
