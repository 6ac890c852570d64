//! Noor queue export reading and cleaned batch writing.
//!
//! Exports are read from CSV or from the first worksheet of a spreadsheet;
//! cleaned batches are always written as CSV.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use noor_ingest::{default_output, read_exports, write_batches};
//!
//! let inputs = [Path::new("queue.csv")];
//! let rows = read_exports(&inputs)?;
//! let batches = noor_core::normalize(&rows, &lookups, &options);
//! write_batches(&batches, &default_output(&inputs), false)?;
//! ```

mod columns;
mod error;
mod reader;
mod spreadsheet;
mod writer;

// === Error Types ===
pub use error::{IngestError, Result};

// === Header Resolution ===
pub use columns::{ColumnMap, NameSource, OPTIONAL_COLUMNS, REQUIRED_COLUMNS, normalize_header};

// === Reading ===
pub use reader::{any_to_string, read_export, read_exports};
pub use spreadsheet::{SPREADSHEET_EXTENSIONS, cell_to_string, is_spreadsheet};

// === Writing ===
pub use writer::{WrittenFile, default_output, group_path, planned_outputs, write_batches};
