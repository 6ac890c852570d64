//! Classification of rows into the four output groups.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Field, NormalizeError};
use crate::record::{NormalizedRecord, RawRow};

/// The four disjoint groups every input row ends up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputGroup {
    Clean,
    Excluded,
    DuplicatePhone,
    IncompleteName,
}

impl OutputGroup {
    pub const ALL: [OutputGroup; 4] = [
        Self::Clean,
        Self::Excluded,
        Self::DuplicatePhone,
        Self::IncompleteName,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clean => "Clean",
            Self::Excluded => "Excluded",
            Self::DuplicatePhone => "Duplicate phone",
            Self::IncompleteName => "Incomplete name",
        }
    }

    /// Suffix appended to the output file stem for this group.
    pub fn file_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Clean => None,
            Self::Excluded => Some("_excluded"),
            Self::DuplicatePhone => Some("_duplicate_phone"),
            Self::IncompleteName => Some("_incomplete_name"),
        }
    }
}

/// Why a row was routed to the Excluded group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ExclusionReason {
    InvalidNationalId,
    InvalidName,
    InvalidDate,
    /// Day-first date whose calendar cannot be told apart safely.
    AmbiguousDate,
    /// Older record of a national ID whose data was merged into a newer row.
    Superseded { by_row: usize },
}

impl ExclusionReason {
    /// Exclusion caused by a failed rule; `None` for failures that only
    /// degrade the record, such as an invalid mobile.
    pub fn for_error(error: &NormalizeError) -> Option<Self> {
        match error {
            NormalizeError::Date(err) if err.is_ambiguous() => Some(Self::AmbiguousDate),
            NormalizeError::Date(_) => Some(Self::InvalidDate),
            NormalizeError::Validation(err) => match err.field {
                Field::NationalId => Some(Self::InvalidNationalId),
                Field::Name => Some(Self::InvalidName),
                Field::VisitDate => Some(Self::InvalidDate),
                Field::Mobile => None,
            },
        }
    }

    /// Specific rule message behind a failure, such as the offending year.
    pub fn detail_for(error: &NormalizeError) -> String {
        match error {
            NormalizeError::Date(err) => err.to_string(),
            NormalizeError::Validation(err) => err.reason.clone(),
        }
    }

    /// Reason with the row number stripped, for grouping in summaries.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidNationalId => "invalid national id",
            Self::InvalidName => "invalid name",
            Self::InvalidDate => "invalid date",
            Self::AmbiguousDate => "ambiguous date",
            Self::Superseded { .. } => "superseded",
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Rows are reported 1-based to match spreadsheet numbering.
            Self::Superseded { by_row } => write!(f, "superseded by row {}", by_row + 1),
            other => f.write_str(other.category()),
        }
    }
}

/// An excluded row keeps its raw fields so nothing is silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedRecord {
    pub row: usize,
    pub raw: RawRow,
    pub reason: ExclusionReason,
    /// Message of the failed rule; absent for superseded rows.
    #[serde(default)]
    pub detail: Option<String>,
}

/// Serialized shape of an Excluded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedRow {
    pub row: String,
    pub reason: String,
    pub national_id: String,
    pub full_name: String,
    pub mobile: String,
    pub visit_date: String,
    pub status: String,
    pub appointment_type: String,
    pub clinic: String,
    pub tags: String,
    pub detail: String,
}

impl ExcludedRow {
    pub const COLUMNS: [&'static str; 11] = [
        "row",
        "reason",
        "national_id",
        "full_name",
        "mobile",
        "visit_date",
        "status",
        "appointment_type",
        "clinic",
        "tags",
        "detail",
    ];

    pub fn values(&self) -> [&str; 11] {
        [
            &self.row,
            &self.reason,
            &self.national_id,
            &self.full_name,
            &self.mobile,
            &self.visit_date,
            &self.status,
            &self.appointment_type,
            &self.clinic,
            &self.tags,
            &self.detail,
        ]
    }
}

impl From<&ExcludedRecord> for ExcludedRow {
    fn from(record: &ExcludedRecord) -> Self {
        let raw = &record.raw;
        Self {
            row: (record.row + 1).to_string(),
            reason: record.reason.to_string(),
            national_id: raw.national_id.clone(),
            full_name: raw.full_name.clone(),
            mobile: raw.mobile.clone().unwrap_or_default(),
            visit_date: raw.visit_date.clone().unwrap_or_default(),
            status: raw.status.clone().unwrap_or_default(),
            appointment_type: raw.appointment_type.clone().unwrap_or_default(),
            clinic: raw.clinic.clone().unwrap_or_default(),
            tags: raw.tags.clone().unwrap_or_default(),
            detail: record.detail.clone().unwrap_or_default(),
        }
    }
}

/// Final partition of a batch, each group in input row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputBatches {
    pub clean: Vec<NormalizedRecord>,
    pub excluded: Vec<ExcludedRecord>,
    pub duplicate_phone: Vec<NormalizedRecord>,
    pub incomplete_name: Vec<NormalizedRecord>,
}

impl OutputBatches {
    pub fn len(&self, group: OutputGroup) -> usize {
        match group {
            OutputGroup::Clean => self.clean.len(),
            OutputGroup::Excluded => self.excluded.len(),
            OutputGroup::DuplicatePhone => self.duplicate_phone.len(),
            OutputGroup::IncompleteName => self.incomplete_name.len(),
        }
    }

    /// Rows accounted for across all four groups.
    pub fn total(&self) -> usize {
        OutputGroup::ALL.iter().map(|group| self.len(*group)).sum()
    }

    /// Excluded counts keyed by reason category.
    pub fn exclusion_breakdown(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.excluded {
            *counts.entry(record.reason.category()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superseded_reason_reports_one_based_row() {
        let reason = ExclusionReason::Superseded { by_row: 4 };
        assert_eq!(reason.to_string(), "superseded by row 5");
        assert_eq!(reason.category(), "superseded");
    }

    #[test]
    fn rule_failures_map_to_reasons() {
        let ambiguous = NormalizeError::from(crate::DateParseError::Ambiguous("01/02/2024".into()));
        assert_eq!(
            ExclusionReason::for_error(&ambiguous),
            Some(ExclusionReason::AmbiguousDate)
        );
        let bad_id = NormalizeError::from(crate::ValidationError::new(Field::NationalId, "missing"));
        assert_eq!(
            ExclusionReason::for_error(&bad_id),
            Some(ExclusionReason::InvalidNationalId)
        );
        let bad_mobile = NormalizeError::from(crate::ValidationError::new(Field::Mobile, "short"));
        assert_eq!(ExclusionReason::for_error(&bad_mobile), None);
    }

    #[test]
    fn excluded_row_keeps_raw_fields() {
        let record = ExcludedRecord {
            row: 0,
            raw: RawRow::new("123", "Ali Rezaei").with_mobile("0912"),
            reason: ExclusionReason::InvalidNationalId,
            detail: Some("length 3 outside 8-11".to_string()),
        };
        let row = ExcludedRow::from(&record);
        assert_eq!(row.row, "1");
        assert_eq!(row.reason, "invalid national id");
        assert_eq!(row.full_name, "Ali Rezaei");
        assert_eq!(row.mobile, "0912");
        assert_eq!(row.clinic, "");
        assert_eq!(row.detail, "length 3 outside 8-11");
        assert_eq!(row.values().len(), ExcludedRow::COLUMNS.len());
    }

    #[test]
    fn detail_keeps_the_rule_message() {
        let year = NormalizeError::from(crate::DateParseError::YearOutOfRange(1600));
        assert_eq!(
            ExclusionReason::detail_for(&year),
            "year 1600 is neither Jalali (1-1500) nor Gregorian (1700+)"
        );
        let short = NormalizeError::from(crate::ValidationError::new(
            Field::Name,
            "first name shorter than 3 characters",
        ));
        assert_eq!(
            ExclusionReason::detail_for(&short),
            "first name shorter than 3 characters"
        );
    }

    #[test]
    fn breakdown_groups_by_category() {
        let excluded = |reason| ExcludedRecord {
            row: 0,
            raw: RawRow::default(),
            reason,
            detail: None,
        };
        let batches = OutputBatches {
            excluded: vec![
                excluded(ExclusionReason::InvalidName),
                excluded(ExclusionReason::Superseded { by_row: 1 }),
                excluded(ExclusionReason::Superseded { by_row: 7 }),
            ],
            ..OutputBatches::default()
        };
        let breakdown = batches.exclusion_breakdown();
        assert_eq!(breakdown.get("superseded"), Some(&2));
        assert_eq!(breakdown.get("invalid name"), Some(&1));
        assert_eq!(batches.total(), 3);
    }
}
