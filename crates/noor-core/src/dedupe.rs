//! Whole-batch deduplication by national ID.
//!
//! Records sharing a national ID are one patient seen at different times.
//! Each group collapses to its most recent record (the base candidate),
//! with missing name parts filled in from older members. Older members are
//! reported as superseded so every input row stays accounted for.
//!
//! After merging, a mobile number shared by more than one patient marks all
//! of those patients' records as phone duplicates.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use noor_model::{NormalizationOptions, NormalizedRecord, RecencyOrder};
use tracing::{debug, info};

/// An older group member folded into a newer base candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Supersession {
    pub row: usize,
    pub by_row: usize,
}

/// Deduplicated records, each list in input row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deduplicated {
    pub clean: Vec<NormalizedRecord>,
    pub duplicate_phone: Vec<NormalizedRecord>,
    pub incomplete_name: Vec<NormalizedRecord>,
    pub superseded: Vec<Supersession>,
}

impl Deduplicated {
    /// Input records accounted for, superseded rows included.
    pub fn total(&self) -> usize {
        self.clean.len()
            + self.duplicate_phone.len()
            + self.incomplete_name.len()
            + self.superseded.len()
    }
}

/// Ordering key inside a group; the greatest key is the most recent.
///
/// Undated records sort before dated ones, and the later input row wins
/// among equal timestamps.
type RecencyKey = (Option<NaiveDateTime>, usize);

pub struct Deduplicator<'a> {
    options: &'a NormalizationOptions,
}

impl<'a> Deduplicator<'a> {
    pub fn new(options: &'a NormalizationOptions) -> Self {
        Self { options }
    }

    pub fn recency_key(&self, record: &NormalizedRecord) -> RecencyKey {
        match self.options.recency {
            RecencyOrder::VisitDate => (
                record.resolved_date.as_ref().map(|date| date.datetime()),
                record.row,
            ),
            RecencyOrder::InputOrder => (None, record.row),
        }
    }

    pub fn deduplicate(&self, records: Vec<NormalizedRecord>) -> Deduplicated {
        let input = records.len();
        let mut groups: BTreeMap<String, Vec<NormalizedRecord>> = BTreeMap::new();
        for record in records {
            groups
                .entry(record.national_id.clone())
                .or_default()
                .push(record);
        }

        let mut out = Deduplicated::default();
        let mut complete = Vec::with_capacity(groups.len());
        for (_, members) in groups {
            let Some((merged, superseded)) = self.merge_group(members) else {
                continue;
            };
            out.superseded.extend(superseded);
            if is_name_complete(&merged) {
                complete.push(merged);
            } else {
                debug!(row = merged.row, "name could not be completed");
                out.incomplete_name.push(merged);
            }
        }

        let mut patients_per_mobile: HashMap<&str, usize> = HashMap::new();
        for record in &complete {
            if let Some(mobile) = record.mobile.as_deref() {
                *patients_per_mobile.entry(mobile).or_insert(0) += 1;
            }
        }
        let shared: Vec<bool> = complete
            .iter()
            .map(|record| {
                record
                    .mobile
                    .as_deref()
                    .and_then(|mobile| patients_per_mobile.get(mobile))
                    .is_some_and(|count| *count > 1)
            })
            .collect();
        for (record, is_shared) in complete.into_iter().zip(shared) {
            if is_shared {
                out.duplicate_phone.push(record);
            } else {
                out.clean.push(record);
            }
        }

        out.clean.sort_by_key(|record| record.row);
        out.duplicate_phone.sort_by_key(|record| record.row);
        out.incomplete_name.sort_by_key(|record| record.row);
        out.superseded.sort_by_key(|entry| entry.row);

        info!(
            input,
            clean = out.clean.len(),
            duplicate_phone = out.duplicate_phone.len(),
            incomplete_name = out.incomplete_name.len(),
            superseded = out.superseded.len(),
            "deduplication complete"
        );
        out
    }

    /// Collapse one national-ID group to its base candidate.
    fn merge_group(
        &self,
        mut members: Vec<NormalizedRecord>,
    ) -> Option<(NormalizedRecord, Vec<Supersession>)> {
        members.sort_by_key(|record| self.recency_key(record));
        let mut merged = members.pop()?;
        let older: Vec<NormalizedRecord> = members.into_iter().rev().collect();

        if merged.first_name.is_empty()
            && let Some(donor) = older.iter().find(|r| !r.first_name.is_empty())
        {
            debug!(row = merged.row, from = donor.row, "first name completed");
            merged.first_name.clone_from(&donor.first_name);
            if self.options.inherit_gender {
                merged.gender = donor.gender;
            }
        }
        if merged.last_name.is_empty()
            && let Some(donor) = older.iter().find(|r| !r.last_name.is_empty())
        {
            debug!(row = merged.row, from = donor.row, "last name completed");
            merged.last_name.clone_from(&donor.last_name);
        }

        let superseded = older
            .iter()
            .map(|record| Supersession {
                row: record.row,
                by_row: merged.row,
            })
            .collect();
        Some((merged, superseded))
    }
}

fn is_name_complete(record: &NormalizedRecord) -> bool {
    !record.first_name.is_empty() && !record.last_name.is_empty()
}
