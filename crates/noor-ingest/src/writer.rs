//! Output batch writing.
//!
//! The Clean group goes to the output path itself; the other groups go to
//! sibling files named `<stem>_excluded.csv`, `<stem>_duplicate_phone.csv`
//! and `<stem>_incomplete_name.csv`, written only when non-empty.

use std::fs::File;
use std::path::{Path, PathBuf};

use noor_model::{ExcludedRow, OutputBatches, OutputGroup, OutputRow};
use polars::prelude::*;
use tracing::info;

use crate::error::{IngestError, Result};

const OUTPUT_EXTENSION: &str = "csv";
const CLEANED_SUFFIX: &str = "_cleaned";
const MERGED_STEM: &str = "merged";

/// One file produced by [`write_batches`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub group: OutputGroup,
    pub path: PathBuf,
    pub rows: usize,
}

/// Default output path: `<stem>_cleaned.csv` next to a single input, or
/// `merged_cleaned.csv` next to the first of several.
pub fn default_output<P: AsRef<Path>>(inputs: &[P]) -> PathBuf {
    let first = inputs.first().map(AsRef::as_ref);
    let dir = first
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let stem = match (inputs.len(), first.and_then(Path::file_stem)) {
        (1, Some(stem)) => stem.to_string_lossy().into_owned(),
        _ => MERGED_STEM.to_string(),
    };
    dir.join(format!("{stem}{CLEANED_SUFFIX}.{OUTPUT_EXTENSION}"))
}

/// File that receives `group` when the Clean output is `output`.
pub fn group_path(output: &Path, group: OutputGroup) -> PathBuf {
    let Some(suffix) = group.file_suffix() else {
        return output.to_path_buf();
    };
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{stem}{suffix}.{OUTPUT_EXTENSION}"))
}

/// Groups that will be written for `batches`, with their target paths.
pub fn planned_outputs(batches: &OutputBatches, output: &Path) -> Vec<(OutputGroup, PathBuf)> {
    OutputGroup::ALL
        .into_iter()
        .filter(|group| *group == OutputGroup::Clean || batches.len(*group) > 0)
        .map(|group| (group, group_path(output, group)))
        .collect()
}

/// Writes every non-empty group; Clean is always written.
///
/// All targets are checked before anything is written, so a refused
/// overwrite leaves the directory untouched.
pub fn write_batches(
    batches: &OutputBatches,
    output: &Path,
    overwrite: bool,
) -> Result<Vec<WrittenFile>> {
    let has_csv_extension = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OUTPUT_EXTENSION));
    if !has_csv_extension {
        return Err(IngestError::UnsupportedExtension {
            path: output.to_path_buf(),
        });
    }

    let planned = planned_outputs(batches, output);
    if !overwrite && let Some((_, path)) = planned.iter().find(|(_, path)| path.exists()) {
        return Err(IngestError::OutputExists { path: path.clone() });
    }

    let mut written = Vec::with_capacity(planned.len());
    for (group, path) in planned {
        let mut df = group_frame(batches, group)?;
        write_csv(&mut df, &path)?;
        info!(group = group.label(), rows = df.height(), path = %path.display(), "output written");
        written.push(WrittenFile {
            group,
            path,
            rows: df.height(),
        });
    }
    Ok(written)
}

fn group_frame(batches: &OutputBatches, group: OutputGroup) -> Result<DataFrame> {
    let records = match group {
        OutputGroup::Clean => &batches.clean,
        OutputGroup::DuplicatePhone => &batches.duplicate_phone,
        OutputGroup::IncompleteName => &batches.incomplete_name,
        OutputGroup::Excluded => {
            let rows: Vec<ExcludedRow> = batches.excluded.iter().map(ExcludedRow::from).collect();
            let values: Vec<[&str; 11]> = rows.iter().map(ExcludedRow::values).collect();
            return build_frame(&ExcludedRow::COLUMNS, &values);
        }
    };
    let rows: Vec<OutputRow> = records.iter().map(OutputRow::from).collect();
    let values: Vec<[&str; 10]> = rows.iter().map(OutputRow::values).collect();
    build_frame(&OutputRow::COLUMNS, &values)
}

fn build_frame<const N: usize>(names: &[&str; N], rows: &[[&str; N]]) -> Result<DataFrame> {
    let columns: Vec<Column> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values: Vec<&str> = rows.iter().map(|row| row[idx]).collect();
            Series::new((*name).into(), values).into_column()
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
