//! Source-column value → tag tables.
//!
//! Each table maps a status, appointment type, or clinic label to a tag.
//! Keys are compared through [`lookup_key`], so letter forms, case, and
//! runs of whitespace in the export do not matter.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use noor_model::text::lookup_key;
use serde::Deserialize;

use crate::error::{LookupError, Result};

/// File name of the tag override table inside a lookup directory.
pub const TAGS_FILE: &str = "tags.toml";

const STATUS_TAGS: &[(&str, &str)] = &[
    ("ثبت نوبت", "not_showed_patient"),
    ("چاپ نوبت", "showup_patient"),
    ("کنسل شده", "canceling_patient"),
];

const APPOINTMENT_TYPE_TAGS: &[(&str, &str)] = &[
    ("اينترنتي", "internet_user"),
    ("اینترنتی", "internet_user"),
    ("فالوآپ", "phone_user"),
    ("فالو آپ", "phone_user"),
];

const CLINIC_TAGS: &[(&str, &str)] = &[
    ("کلینیک  ویژه فوق تخصصی جراحی چاقی", "bariatric_surgery_clinic"),
    ("کلینیک  ویژه فوق تخصصی چکاپ", "checkup_specialty_clinic"),
    ("کلینیک  ویژه فوق تخصصی گوارش و کبد", "gastro_hepatology_specialty_clinic"),
    ("کلینیک بینایی سنجی", "optometry_clinic"),
    ("کلینیک تخصصی ارتوپدی", "orthopedics_clinic"),
    ("کلینیک تخصصی اورولوژی(جراحی کلیه و پروستات)", "urology_clinic"),
    ("کلینیک تخصصی بیماری های داخلی", "internal_medicine_clinic"),
    ("کلینیک تخصصی جراحی اطفال", "pediatric_surgery_clinic"),
    ("کلینیک تخصصی جراحی جنرال", "general_surgery_clinic"),
    ("کلینیک تخصصی جراحی زنان و زایمان", "obgyn_surgery_clinic"),
    ("کلینیک تخصصی جراحی عروق و واریس", "vascular_varicose_surgery_clinic"),
    ("کلینیک تخصصی جراحی فک و صورت", "oral_maxillofacial_surgery_clinic"),
    ("کلینیک تخصصی جراحی قلب", "cardiac_surgery_clinic"),
    ("کلینیک تخصصی جراحی مغز و اعصاب", "neurosurgery_clinic"),
    ("کلینیک تخصصی خون و سرطان", "hematology_oncology_clinic"),
    ("کلینیک تخصصی داخلی", "internal_specialty_clinic"),
    ("کلینیک تخصصی داخلی اطفال و نوزادان", "pediatric_neonatal_internal_clinic"),
    ("کلینیک تخصصی داخلی ریه", "pulmonology_clinic"),
    ("کلینیک تخصصی داخلی قلب و عروق", "cardiology_clinic"),
    ("کلینیک تخصصی داخلی مغز و اعصاب اطفال", "pediatric_neurology_clinic"),
    ("کلینیک تخصصی روانپزشکی", "psychiatry_clinic"),
    ("کلینیک تخصصی زیبایی و بیوتی", "aesthetics_beauty_clinic"),
    ("کلینیک تخصصی عفونی", "infectious_diseases_clinic"),
    ("کلینیک تخصصی پوست، مو و زیبایی", "dermatology_hair_aesthetics_clinic"),
    ("کلینیک تخصصی چشم", "ophthalmology_clinic"),
    ("کلینیک تخصصی گوش و حلق و بینی", "ent_clinic"),
    ("کلینیک تغذیه و رژیم درمانی", "nutrition_diet_therapy_clinic"),
    ("کلینیک جراحی پلاستیک", "plastic_surgery_clinic"),
    ("کلینیک داخلی مغز و اعصاب", "neurology_clinic"),
    ("کلینیک زخم", "wound_care_clinic"),
    ("کلینیک شنوایی سنجی", "audiology_clinic"),
    ("کلینیک فوق تخصصی اختلالات جنسی و زناشویی", "sexual_marital_disorders_clinic"),
    ("کلینیک فوق تخصصی بیماری های قلب", "cardiac_super_specialty_clinic"),
    ("کلینیک فوق تخصصی نفرولوژی، غدد، دیابت و تیروئید", "nephrology_endocrine_diabetes_thyroid_clinic"),
    ("کلینیک فوق تخصصی پستان", "breast_super_specialty_clinic"),
    ("کلینیک فوق تخصصی گوارش اطفال", "pediatric_gastroenterology_clinic"),
    ("کلینیک مشاوره و روانشناسی", "counseling_psychology_clinic"),
    ("کلینیک ویژه  فوق تخصصی درد", "pain_super_specialty_clinic"),
    ("کلینیک ویژه  فوق تخصصی زانو و تعویض مفصل", "knee_joint_replacement_clinic"),
    ("کلینیک ویژه  فوق تخصصی قلب اطفال تا 15 سال", "pediatric_cardiology_clinic"),
    ("کلینیک ویژه فوق تخصصی روماتولوژی", "rheumatology_super_specialty_clinic"),
    ("کلینیک ویژه فوق تخصصی قلب", "heart_super_specialty_clinic"),
];

/// One label → tag table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTable {
    entries: HashMap<String, String>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut table = Self::new();
        for (label, tag) in pairs {
            table.insert(label, tag);
        }
        table
    }

    /// Adds or replaces the tag for `label`. Blank labels or tags are ignored.
    pub fn insert(&mut self, label: &str, tag: &str) {
        let key = lookup_key(label);
        let tag = tag.trim();
        if key.is_empty() || tag.is_empty() {
            return;
        }
        self.entries.insert(key, tag.to_string());
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(&lookup_key(label)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
struct TagFile {
    #[serde(default)]
    status: BTreeMap<String, String>,
    #[serde(default)]
    appointment_type: BTreeMap<String, String>,
    #[serde(default)]
    clinic: BTreeMap<String, String>,
}

/// The three tag tables used when building record tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTables {
    pub status: TagTable,
    pub appointment_type: TagTable,
    pub clinic: TagTable,
}

impl Default for TagTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TagTables {
    /// Tables for the Noor hospital export.
    pub fn builtin() -> Self {
        Self {
            status: TagTable::from_pairs(STATUS_TAGS),
            appointment_type: TagTable::from_pairs(APPOINTMENT_TYPE_TAGS),
            clinic: TagTable::from_pairs(CLINIC_TAGS),
        }
    }

    /// Tables with no entries; only base tags are ever produced.
    pub fn empty() -> Self {
        Self {
            status: TagTable::new(),
            appointment_type: TagTable::new(),
            clinic: TagTable::new(),
        }
    }

    /// Merges a `tags.toml` file over the current tables.
    ///
    /// The file has `[status]`, `[appointment_type]` and `[clinic]` tables of
    /// `"label" = "tag"` pairs. Labels already present get the file's tag.
    pub fn merge_toml(&mut self, path: &Path) -> Result<usize> {
        let text = fs::read_to_string(path).map_err(|e| LookupError::io(path, e))?;
        let file: TagFile = toml::from_str(&text).map_err(|source| LookupError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        let mut merged = 0usize;
        for (table, entries) in [
            (&mut self.status, &file.status),
            (&mut self.appointment_type, &file.appointment_type),
            (&mut self.clinic, &file.clinic),
        ] {
            for (label, tag) in entries {
                table.insert(label, tag);
                merged += 1;
            }
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_tables_cover_the_export_labels() {
        let tables = TagTables::builtin();
        assert_eq!(tables.status.len(), 3);
        assert_eq!(tables.clinic.len(), 42);
        assert_eq!(tables.status.get("چاپ نوبت"), Some("showup_patient"));
        assert_eq!(tables.appointment_type.get("فالو آپ"), Some("phone_user"));
    }

    #[test]
    fn labels_match_despite_spacing_and_letter_forms() {
        let tables = TagTables::builtin();
        assert_eq!(
            tables.clinic.get("کلینیک ویژه فوق تخصصی جراحی چاقی"),
            Some("bariatric_surgery_clinic")
        );
        assert_eq!(
            tables.clinic.get(" كلينيك تخصصي چشم "),
            Some("ophthalmology_clinic")
        );
        assert_eq!(tables.clinic.get("کلینیک ناشناخته"), None);
    }

    #[test]
    fn toml_overrides_and_extends_tables() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[status]\n\"ثبت نوبت\" = \"booked\"\n\n[clinic]\n\"کلینیک دندانپزشکی\" = \"dental_clinic\"\n"
        )
        .unwrap();

        let mut tables = TagTables::builtin();
        let merged = tables.merge_toml(file.path()).unwrap();
        assert_eq!(merged, 2);
        assert_eq!(tables.status.get("ثبت نوبت"), Some("booked"));
        assert_eq!(tables.clinic.get("کلینیک دندانپزشکی"), Some("dental_clinic"));
        assert_eq!(tables.clinic.len(), 43);
    }

    #[test]
    fn malformed_toml_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[status\n").unwrap();
        let err = TagTables::builtin().merge_toml(file.path()).unwrap_err();
        assert!(matches!(err, LookupError::Toml { .. }));
    }
}
