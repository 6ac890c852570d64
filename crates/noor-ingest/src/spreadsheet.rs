//! Spreadsheet exports (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`).
//!
//! The first worksheet is loaded into the same all-string frame a CSV export
//! produces, so header resolution and row building are shared. Cells stored
//! as text keep their leading zeros; numeric cells are written without a
//! trailing `.0`, and date cells become serial day numbers.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Extensions read through the spreadsheet path; anything else is CSV.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Converts a worksheet cell to text; empty and error cells become empty.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format_number(dt.as_f64()),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Reads the first worksheet; the first row is the header.
///
/// Rows with every cell blank are skipped. A blank header cell is named
/// `column_<n>` (1-based).
pub fn read_spreadsheet(path: &Path) -> Result<DataFrame> {
    let read_error = |message: String| IngestError::SpreadsheetRead {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| read_error("workbook has no worksheets".to_string()))?
        .map_err(|e| read_error(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = cell_to_string(cell);
            if name.trim().is_empty() {
                format!("column_{}", idx + 1)
            } else {
                name
            }
        })
        .collect();

    let mut values: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for row in rows {
        let cells: Vec<String> = row.iter().map(cell_to_string).collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        for (column, cell) in values.iter_mut().zip(cells) {
            column.push(cell);
        }
    }

    let columns: Vec<Column> = names
        .iter()
        .zip(values)
        .map(|(name, column)| Series::new(name.as_str().into(), column).into_column())
        .collect();
    Ok(DataFrame::new(columns)?)
}
