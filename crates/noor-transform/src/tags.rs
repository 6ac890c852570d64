//! Tag derivation from status, appointment type and clinic cells.

use std::collections::BTreeSet;

use noor_lookup::{TagTable, TagTables};
use noor_model::RawRow;
use noor_model::text::is_blank;

/// Maps raw source values to tags.
///
/// Every record gets the base tags and any tags the row already carries.
/// Status, appointment type and clinic each add at most one tag; values
/// missing from the tables add nothing.
#[derive(Debug, Clone, Copy)]
pub struct TagMapper<'a> {
    tables: &'a TagTables,
    base_tags: &'a [String],
}

impl<'a> TagMapper<'a> {
    pub fn new(tables: &'a TagTables, base_tags: &'a [String]) -> Self {
        Self { tables, base_tags }
    }

    pub fn tags_for(&self, row: &RawRow) -> BTreeSet<String> {
        let mut tags: BTreeSet<String> = self
            .base_tags
            .iter()
            .filter(|tag| !tag.trim().is_empty())
            .cloned()
            .collect();
        if let Some(existing) = row.tags.as_deref() {
            tags.extend(
                existing
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !is_blank(tag))
                    .map(ToString::to_string),
            );
        }
        let lookups = [
            (&self.tables.status, row.status.as_deref()),
            (&self.tables.appointment_type, row.appointment_type.as_deref()),
            (&self.tables.clinic, row.clinic.as_deref()),
        ];
        for (table, value) in lookups {
            if let Some(tag) = lookup(table, value) {
                tags.insert(tag.to_string());
            }
        }
        tags
    }
}

fn lookup<'t>(table: &'t TagTable, value: Option<&str>) -> Option<&'t str> {
    value.filter(|v| !is_blank(v)).and_then(|v| table.get(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use noor_model::options::DEFAULT_BASE_TAGS;

    fn base_tags() -> Vec<String> {
        DEFAULT_BASE_TAGS.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn maps_all_three_columns() {
        let tables = TagTables::builtin();
        let base = base_tags();
        let mapper = TagMapper::new(&tables, &base);
        let row = RawRow::new("0012345678", "Ali Rezaei")
            .with_status("چاپ نوبت")
            .with_appointment_type("اينترنتي")
            .with_clinic("کلینیک تخصصی داخلی قلب و عروق");
        let tags: Vec<String> = mapper.tags_for(&row).into_iter().collect();
        assert_eq!(
            tags,
            vec![
                "cardiology_clinic",
                "internet_user",
                "noor_hospital_queue",
                "patient",
                "showup_patient",
            ]
        );
    }

    #[test]
    fn unmatched_values_are_silently_omitted() {
        let tables = TagTables::builtin();
        let base = base_tags();
        let mapper = TagMapper::new(&tables, &base);
        let row = RawRow::new("0012345678", "Ali Rezaei")
            .with_status("unknown status")
            .with_clinic("nan");
        let tags = mapper.tags_for(&row);
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("patient"));
    }

    #[test]
    fn existing_tags_are_carried_through() {
        let tables = TagTables::builtin();
        let base = base_tags();
        let mapper = TagMapper::new(&tables, &base);
        let row = RawRow::new("0012345678", "Ali Rezaei")
            .with_tags("cardiology_clinic, patient,,vip")
            .with_clinic("کلینیک تخصصی داخلی قلب و عروق");
        let tags: Vec<String> = mapper.tags_for(&row).into_iter().collect();
        assert_eq!(
            tags,
            vec!["cardiology_clinic", "noor_hospital_queue", "patient", "vip"]
        );
    }

    #[test]
    fn empty_base_tags_are_allowed() {
        let tables = TagTables::empty();
        let mapper = TagMapper::new(&tables, &[]);
        assert!(mapper.tags_for(&RawRow::default()).is_empty());
    }
}
