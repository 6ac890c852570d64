//! Input rows, normalized records, and the serialized output shape.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::ResolvedDate;

/// One source row as read from the export, before any cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub national_id: String,
    pub full_name: String,
    pub mobile: Option<String>,
    pub visit_date: Option<String>,
    pub status: Option<String>,
    pub appointment_type: Option<String>,
    pub clinic: Option<String>,
    /// Comma-separated tags already attached upstream, kept as-is.
    pub tags: Option<String>,
}

impl RawRow {
    pub fn new(national_id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            national_id: national_id.into(),
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }

    #[must_use]
    pub fn with_visit_date(mut self, visit_date: impl Into<String>) -> Self {
        self.visit_date = Some(visit_date.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn with_appointment_type(mut self, appointment_type: impl Into<String>) -> Self {
        self.appointment_type = Some(appointment_type.into());
        self
    }

    #[must_use]
    pub fn with_clinic(mut self, clinic: impl Into<String>) -> Self {
        self.clinic = Some(clinic.into());
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a gender label; anything unrecognised is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row that passed per-row normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Zero-based position of the source row in the input batch.
    pub row: usize,
    /// Digits only; the deduplication identity key.
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub mobile: Option<String>,
    pub resolved_date: Option<ResolvedDate>,
    pub tags: BTreeSet<String>,
}

impl NormalizedRecord {
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    /// Comma-joined tags in sorted order.
    pub fn tags_joined(&self) -> String {
        self.tags
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Serialized shape of a Clean, DuplicatePhone, or IncompleteName record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub mobile: String,
    pub visit_date: String,
    pub visit_date_ui: String,
    pub visit_datetime_ui: String,
    pub visit_date_db: String,
    pub tags: String,
}

impl OutputRow {
    pub const COLUMNS: [&'static str; 10] = [
        "national_id",
        "first_name",
        "last_name",
        "gender",
        "mobile",
        "visit_date",
        "visit_date_ui",
        "visit_datetime_ui",
        "visit_date_db",
        "tags",
    ];

    /// Field values in [`OutputRow::COLUMNS`] order.
    pub fn values(&self) -> [&str; 10] {
        [
            &self.national_id,
            &self.first_name,
            &self.last_name,
            &self.gender,
            &self.mobile,
            &self.visit_date,
            &self.visit_date_ui,
            &self.visit_datetime_ui,
            &self.visit_date_db,
            &self.tags,
        ]
    }
}

impl From<&NormalizedRecord> for OutputRow {
    fn from(record: &NormalizedRecord) -> Self {
        let date = record.resolved_date.as_ref();
        Self {
            national_id: record.national_id.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            gender: record.gender.as_str().to_string(),
            mobile: record.mobile.clone().unwrap_or_default(),
            visit_date: date.map(ResolvedDate::visit_date).unwrap_or_default(),
            visit_date_ui: date.map(ResolvedDate::visit_date_ui).unwrap_or_default(),
            visit_datetime_ui: date
                .map(ResolvedDate::visit_datetime_ui)
                .unwrap_or_default(),
            visit_date_db: date.map(ResolvedDate::visit_date_db).unwrap_or_default(),
            tags: record.tags_joined(),
        }
    }
}
