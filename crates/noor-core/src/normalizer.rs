//! Per-row normalization.
//!
//! One [`RawRow`] in, one [`RowOutcome`] out. Rows are judged in isolation;
//! nothing here looks at other rows.

use noor_lookup::LookupTables;
use noor_model::{
    DateParseError, ExcludedRecord, ExclusionReason, Field, Gender, NormalizationOptions,
    NormalizeError, NormalizedRecord, RawRow, ResolvedDate,
};
use noor_transform::{GenderClassifier, NameParts, TagMapper, resolve_date, split_full_name};
use noor_validate::{ValidationVerdict, validate_mobile, validate_name, validate_national_id};
use tracing::{debug, trace};

/// Rules that can exclude a row, in the order they are evaluated.
///
/// Evaluation stops at the first failure, so a row with both a bad ID and a
/// bad name is always reported as an ID failure.
pub const EXCLUSION_RULES: [Field; 3] = [Field::NationalId, Field::Name, Field::VisitDate];

/// Result of normalizing one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Normalized(NormalizedRecord),
    Excluded(ExcludedRecord),
}

/// Values collected while the exclusion rules run.
#[derive(Debug, Default)]
struct Checked {
    national_id: String,
    name: NameParts,
    date: Option<ResolvedDate>,
    date_error: Option<DateParseError>,
    mobile: Option<String>,
}

pub struct RecordNormalizer<'a> {
    lookups: &'a LookupTables,
    options: &'a NormalizationOptions,
}

impl<'a> RecordNormalizer<'a> {
    pub fn new(lookups: &'a LookupTables, options: &'a NormalizationOptions) -> Self {
        Self { lookups, options }
    }

    pub fn normalize_row(&self, row: usize, raw: &RawRow) -> RowOutcome {
        let mut checked = Checked::default();
        for field in EXCLUSION_RULES {
            let verdict = self.check(field, raw, &mut checked);
            let error = match (checked.date_error.take(), verdict.error()) {
                (Some(date_error), _) => Some(NormalizeError::from(date_error)),
                (None, failure) => failure.map(NormalizeError::from),
            };
            if let Some(error) = error
                && let Some(reason) = ExclusionReason::for_error(&error)
            {
                debug!(row, field = %field, reason = %reason, "row excluded");
                return RowOutcome::Excluded(ExcludedRecord {
                    row,
                    raw: raw.clone(),
                    reason,
                    detail: Some(ExclusionReason::detail_for(&error)),
                });
            }
        }

        let mobile_verdict = self.check(Field::Mobile, raw, &mut checked);
        if !mobile_verdict.passed {
            debug!(row, "invalid mobile cleared");
        }

        let Checked {
            national_id,
            name,
            date,
            mobile,
            ..
        } = checked;
        let classifier = GenderClassifier::new(&self.lookups.names);
        // A leading honorific splits off as the first name; the full cell
        // still resolves it.
        let gender = match classifier.classify(&name.first_name) {
            Gender::Unknown => classifier.classify(&raw.full_name),
            known => known,
        };
        let tags = TagMapper::new(&self.lookups.tags, &self.options.base_tags).tags_for(raw);
        trace!(row, gender = %gender, tags = tags.len(), "row normalized");

        RowOutcome::Normalized(NormalizedRecord {
            row,
            national_id,
            first_name: name.first_name,
            last_name: name.last_name,
            gender,
            mobile,
            resolved_date: date,
            tags,
        })
    }

    /// Verdicts for every rule, mobile last, without stopping at a failure.
    pub fn verdicts(&self, raw: &RawRow) -> Vec<ValidationVerdict> {
        let mut checked = Checked::default();
        EXCLUSION_RULES
            .iter()
            .chain([Field::Mobile].iter())
            .map(|field| self.check(*field, raw, &mut checked))
            .collect()
    }

    fn check(&self, field: Field, raw: &RawRow, checked: &mut Checked) -> ValidationVerdict {
        match field {
            Field::NationalId => {
                let result = validate_national_id(&raw.national_id);
                if let Ok(id) = &result {
                    checked.national_id.clone_from(id);
                }
                ValidationVerdict::of(field, &result)
            }
            Field::Name => {
                checked.name = split_full_name(&raw.full_name);
                let result = validate_name(
                    &checked.name.first_name,
                    &checked.name.last_name,
                    &self.options.placeholder_names,
                );
                ValidationVerdict::of(field, &result)
            }
            Field::VisitDate => match raw.visit_date.as_deref().map(resolve_date).transpose() {
                Ok(date) => {
                    checked.date = date.flatten();
                    ValidationVerdict::pass(field)
                }
                Err(err) => {
                    let verdict = ValidationVerdict::fail(field, err.to_string());
                    checked.date_error = Some(err);
                    verdict
                }
            },
            Field::Mobile => match raw.mobile.as_deref().map(validate_mobile).transpose() {
                Ok(mobile) => {
                    checked.mobile = mobile.flatten();
                    ValidationVerdict::pass(field)
                }
                Err(err) => {
                    checked.mobile = None;
                    ValidationVerdict::fail(field, err.reason)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookups() -> LookupTables {
        let mut tables = LookupTables::builtin();
        tables.names.insert_primary("علی", Gender::Male);
        tables
    }

    fn normalize(raw: &RawRow) -> RowOutcome {
        let lookups = lookups();
        let options = NormalizationOptions::default();
        RecordNormalizer::new(&lookups, &options).normalize_row(0, raw)
    }

    fn excluded(outcome: RowOutcome) -> ExcludedRecord {
        match outcome {
            RowOutcome::Excluded(record) => record,
            RowOutcome::Normalized(record) => panic!("expected exclusion, got {record:?}"),
        }
    }

    fn reason(outcome: RowOutcome) -> ExclusionReason {
        excluded(outcome).reason
    }

    fn record(outcome: RowOutcome) -> NormalizedRecord {
        match outcome {
            RowOutcome::Normalized(record) => record,
            RowOutcome::Excluded(record) => panic!("expected record, got {record:?}"),
        }
    }

    #[test]
    fn builds_full_record() {
        let raw = RawRow::new("۰۰۱۲۳۴۵۶۷۸", "علي رضایی")
            .with_mobile("+98 912 123 4567")
            .with_visit_date("1403/02/12 14:30")
            .with_status("ثبت نوبت");
        let record = record(normalize(&raw));
        assert_eq!(record.national_id, "0012345678");
        assert_eq!(record.first_name, "علی");
        assert_eq!(record.last_name, "رضایی");
        assert_eq!(record.gender, Gender::Male);
        assert_eq!(record.mobile.as_deref(), Some("09121234567"));
        assert_eq!(
            record.resolved_date.map(|d| d.visit_date()).as_deref(),
            Some("2024-05-01")
        );
        assert!(record.tags.contains("not_showed_patient"));
    }

    #[test]
    fn national_id_failure_wins_over_name_and_date() {
        let raw = RawRow::new("123", "X").with_visit_date("garbage");
        assert_eq!(reason(normalize(&raw)), ExclusionReason::InvalidNationalId);
    }

    #[test]
    fn name_failure_wins_over_date() {
        let raw = RawRow::new("0012345678", "کاربر تلفنی").with_visit_date("garbage");
        assert_eq!(reason(normalize(&raw)), ExclusionReason::InvalidName);
    }

    #[test]
    fn bad_and_ambiguous_dates() {
        let raw = RawRow::new("0012345678", "Ali Rezaei").with_visit_date("1404/12/30");
        assert_eq!(reason(normalize(&raw)), ExclusionReason::InvalidDate);
        let raw = RawRow::new("0012345678", "Ali Rezaei").with_visit_date("03/04/2024");
        assert_eq!(reason(normalize(&raw)), ExclusionReason::AmbiguousDate);
    }

    #[test]
    fn exclusion_carries_rule_message() {
        let raw = RawRow::new("0012345678", "Al Rezaei");
        let record = excluded(normalize(&raw));
        assert_eq!(record.reason, ExclusionReason::InvalidName);
        assert_eq!(
            record.detail.as_deref(),
            Some("first name shorter than 3 characters")
        );

        let raw = RawRow::new("0012345678", "Ali Rezaei").with_visit_date("1600/01/01");
        let record = excluded(normalize(&raw));
        assert_eq!(
            record.detail.as_deref(),
            Some("year 1600 is neither Jalali (1-1500) nor Gregorian (1700+)")
        );
    }

    #[test]
    fn punctuation_only_name_is_excluded() {
        let raw = RawRow::new("0012345678", "--- '''");
        assert_eq!(reason(normalize(&raw)), ExclusionReason::InvalidName);
    }

    #[test]
    fn gender_comes_from_first_name_or_honorific() {
        let mut lookups = lookups();
        lookups.names.insert_primary("مریم", Gender::Female);
        let options = NormalizationOptions::default();
        let normalizer = RecordNormalizer::new(&lookups, &options);

        let male = record(normalizer.normalize_row(0, &RawRow::new("0012345678", "علی رضایی")));
        assert_eq!(male.gender, Gender::Male);

        let raw = RawRow::new("0012345678", "خانم مریم احمدی");
        let female = record(normalizer.normalize_row(0, &raw));
        assert_eq!(female.first_name, "خانم");
        assert_eq!(female.gender, Gender::Female);
    }

    #[test]
    fn absent_date_and_bad_mobile_degrade_only() {
        let raw = RawRow::new("0012345678", "Ali Rezaei").with_mobile("12345");
        let record = record(normalize(&raw));
        assert_eq!(record.mobile, None);
        assert_eq!(record.resolved_date, None);
        assert_eq!(record.gender, Gender::Unknown);
    }

    #[test]
    fn single_word_name_is_kept_for_completion() {
        let record = record(normalize(&RawRow::new("0012345678", "Ali")));
        assert_eq!(record.last_name, "");
    }

    #[test]
    fn verdicts_report_every_rule() {
        let lookups = lookups();
        let options = NormalizationOptions::default();
        let normalizer = RecordNormalizer::new(&lookups, &options);
        let verdicts = normalizer.verdicts(&RawRow::new("0000000000", "Al").with_visit_date("x"));
        let fields: Vec<Field> = verdicts.iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec![Field::NationalId, Field::Name, Field::VisitDate, Field::Mobile]
        );
        assert!(verdicts[..3].iter().all(|v| !v.passed));
        assert!(verdicts[3].passed);
        assert_eq!(verdicts[0].reason, "all digits identical");
    }
}
