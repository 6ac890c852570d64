use std::collections::BTreeMap;
use std::path::PathBuf;

use noor_model::{OutputBatches, OutputGroup};

#[derive(Debug)]
pub struct RunResult {
    pub inputs: Vec<PathBuf>,
    pub rows_read: usize,
    pub groups: Vec<GroupSummary>,
    /// Excluded row counts keyed by reason category.
    pub exclusions: BTreeMap<&'static str, usize>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub group: OutputGroup,
    pub records: usize,
    /// Target file; `None` when the group is empty and nothing is written.
    pub path: Option<PathBuf>,
}

impl RunResult {
    pub fn from_batches(
        inputs: Vec<PathBuf>,
        rows_read: usize,
        batches: &OutputBatches,
        paths: &[(OutputGroup, PathBuf)],
        dry_run: bool,
    ) -> Self {
        let groups = OutputGroup::ALL
            .into_iter()
            .map(|group| GroupSummary {
                group,
                records: batches.len(group),
                path: paths
                    .iter()
                    .find(|(planned, _)| *planned == group)
                    .map(|(_, path)| path.clone()),
            })
            .collect();
        Self {
            inputs,
            rows_read,
            groups,
            exclusions: batches.exclusion_breakdown(),
            dry_run,
        }
    }

    pub fn total_records(&self) -> usize {
        self.groups.iter().map(|summary| summary.records).sum()
    }
}
