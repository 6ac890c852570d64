//! Header alias resolution for Noor exports.
//!
//! Exports are produced with Persian headers whose spacing varies between
//! hospital installs (`کدملی` vs `کد ملی`). Headers are compared with all
//! whitespace removed and case folded. English field names are accepted too,
//! so cleaned output can be read back in.

use std::collections::HashMap;
use std::path::Path;

use noor_model::text::{ZWNJ, lookup_key};

use crate::error::{IngestError, Result};

/// Source fields and the headers they may appear under, in preference order.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("national_id", &["کدملی", "کد ملی", "شناسه ملی", "national_id"]),
    ("full_name", &["بیمار", "نام و نام خانوادگی", "نام بیمار", "full_name"]),
    ("mobile", &["موبایل", "شماره موبایل", "شماره تماس", "mobile"]),
];

pub const OPTIONAL_COLUMNS: &[(&str, &[&str])] = &[
    ("visit_date", &["تاریخ اخذ", "visit_date_db", "visit_date"]),
    ("status", &["وضعیت", "status"]),
    ("appointment_type", &["نوع", "appointment_type"]),
    ("clinic", &["درمانگاه", "clinic"]),
    ("tags", &["tags"]),
];

/// Split-name headers used when no full-name column exists.
const FIRST_NAME_HEADER: &str = "first_name";
const LAST_NAME_HEADER: &str = "last_name";

/// Header comparison key: no whitespace, no ZWNJ, case folded.
pub fn normalize_header(value: &str) -> String {
    lookup_key(value.trim_start_matches('\u{feff}'))
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != ZWNJ)
        .collect()
}

/// Where each field's values come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSource {
    FullName(String),
    /// `first_name` and `last_name` columns joined with a space.
    Split { first: String, last: String },
}

/// Actual header names chosen for each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub national_id: String,
    pub name: NameSource,
    pub mobile: String,
    pub visit_date: Option<String>,
    pub status: Option<String>,
    pub appointment_type: Option<String>,
    pub clinic: Option<String>,
    pub tags: Option<String>,
}

impl ColumnMap {
    /// Resolve fields against a file's headers.
    pub fn resolve<S: AsRef<str>>(headers: &[S], path: &Path) -> Result<Self> {
        let normalized: HashMap<String, &str> = headers
            .iter()
            .map(|header| (normalize_header(header.as_ref()), header.as_ref()))
            .collect();
        let find = |aliases: &[&str]| {
            aliases
                .iter()
                .find_map(|alias| normalized.get(&normalize_header(alias)))
                .map(|header| (*header).to_string())
        };
        let required = |field: &'static str| {
            let aliases = aliases_for(REQUIRED_COLUMNS, field);
            find(aliases).ok_or_else(|| IngestError::MissingColumn {
                field,
                aliases: aliases.join(", "),
                path: path.to_path_buf(),
            })
        };
        let optional = |field: &str| find(aliases_for(OPTIONAL_COLUMNS, field));

        let national_id = required("national_id")?;
        let name = match required("full_name") {
            Ok(header) => NameSource::FullName(header),
            Err(err) => match (find(&[FIRST_NAME_HEADER]), find(&[LAST_NAME_HEADER])) {
                (Some(first), Some(last)) => NameSource::Split { first, last },
                _ => return Err(err),
            },
        };
        let mobile = required("mobile")?;

        Ok(Self {
            national_id,
            name,
            mobile,
            visit_date: optional("visit_date"),
            status: optional("status"),
            appointment_type: optional("appointment_type"),
            clinic: optional("clinic"),
            tags: optional("tags"),
        })
    }
}

fn aliases_for<'a>(table: &'a [(&str, &'a [&'a str])], field: &str) -> &'a [&'a str] {
    table
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}
