//! Normalize, deduplicate, partition.

use noor_lookup::LookupTables;
use noor_model::{
    ExcludedRecord, ExclusionReason, NormalizationOptions, OutputBatches, RawRow,
};
use tracing::{info, info_span};

use crate::dedupe::Deduplicator;
use crate::normalizer::{RecordNormalizer, RowOutcome};

/// Run the whole pipeline over one batch of rows.
///
/// Every input row lands in exactly one of the four output groups, and each
/// group lists its rows in input order. Lookup tables and options are only
/// read.
pub fn normalize(
    rows: &[RawRow],
    lookups: &LookupTables,
    options: &NormalizationOptions,
) -> OutputBatches {
    let span = info_span!("normalize", rows = rows.len());
    let _guard = span.enter();

    let normalizer = RecordNormalizer::new(lookups, options);
    let mut normalized = Vec::with_capacity(rows.len());
    let mut excluded = Vec::new();
    for (row, raw) in rows.iter().enumerate() {
        match normalizer.normalize_row(row, raw) {
            RowOutcome::Normalized(record) => normalized.push(record),
            RowOutcome::Excluded(record) => excluded.push(record),
        }
    }
    info!(
        normalized = normalized.len(),
        excluded = excluded.len(),
        "row normalization complete"
    );

    let deduplicated = Deduplicator::new(options).deduplicate(normalized);
    excluded.extend(
        deduplicated
            .superseded
            .iter()
            .filter_map(|entry| {
                rows.get(entry.row).map(|raw| ExcludedRecord {
                    row: entry.row,
                    raw: raw.clone(),
                    reason: ExclusionReason::Superseded {
                        by_row: entry.by_row,
                    },
                    detail: None,
                })
            }),
    );
    excluded.sort_by_key(|record| record.row);

    let batches = OutputBatches {
        clean: deduplicated.clean,
        excluded,
        duplicate_phone: deduplicated.duplicate_phone,
        incomplete_name: deduplicated.incomplete_name,
    };
    info!(
        clean = batches.clean.len(),
        excluded = batches.excluded.len(),
        duplicate_phone = batches.duplicate_phone.len(),
        incomplete_name = batches.incomplete_name.len(),
        "pipeline complete"
    );
    batches
}
