use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use noor_core::normalize;
use noor_ingest::{default_output, planned_outputs, read_exports, write_batches};
use noor_lookup::LookupTables;
use noor_model::{NormalizationOptions, OutputBatches};

use crate::cli::Cli;
use crate::logging::redact_value;
use crate::types::RunResult;

pub fn run(cli: &Cli) -> Result<RunResult> {
    let span = info_span!("run", inputs = cli.inputs.len());
    let _guard = span.enter();
    let started = Instant::now();

    let lookups = LookupTables::load(cli.lookup_dir.as_deref()).context("load lookup tables")?;
    let options = normalization_options(cli);

    let rows = read_exports(&cli.inputs).context("read exports")?;
    let batches = normalize(&rows, &lookups, &options);
    trace_exclusions(&batches);

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.inputs));
    let paths = if cli.dry_run {
        planned_outputs(&batches, &output)
    } else {
        write_batches(&batches, &output, cli.overwrite)
            .with_context(|| format!("write outputs next to {}", output.display()))?
            .into_iter()
            .map(|file| (file.group, file.path))
            .collect()
    };

    info!(
        rows = rows.len(),
        elapsed = ?started.elapsed(),
        dry_run = cli.dry_run,
        "run complete"
    );
    Ok(RunResult::from_batches(
        cli.inputs.clone(),
        rows.len(),
        &batches,
        &paths,
        cli.dry_run,
    ))
}

pub fn normalization_options(cli: &Cli) -> NormalizationOptions {
    let mut options = NormalizationOptions::new()
        .with_recency(cli.recency.into())
        .with_inherit_gender(!cli.no_inherit_gender);
    if !cli.base_tags.is_empty() {
        options = options.with_base_tags(cli.base_tags.iter().cloned());
    }
    if !cli.placeholder_names.is_empty() {
        options = options.with_placeholder_names(cli.placeholder_names.iter().cloned());
    }
    options
}

fn trace_exclusions(batches: &OutputBatches) {
    for record in &batches.excluded {
        trace!(
            row = record.row + 1,
            national_id = redact_value(&record.raw.national_id),
            full_name = redact_value(&record.raw.full_name),
            reason = %record.reason,
            "row excluded"
        );
    }
}
