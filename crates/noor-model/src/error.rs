use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    NationalId,
    Name,
    Mobile,
    VisitDate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NationalId => "national_id",
            Self::Name => "name",
            Self::Mobile => "mobile",
            Self::VisitDate => "visit_date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A visit date that was supplied but cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("no date found in '{0}'")]
    Malformed(String),
    #[error("year {0} is neither Jalali (1-1500) nor Gregorian (1700+)")]
    YearOutOfRange(i32),
    #[error("{0} is not a valid calendar date")]
    InvalidCalendarDate(String),
    #[error("invalid time '{0}'")]
    InvalidTime(String),
    #[error("day-first date '{0}' is ambiguous")]
    Ambiguous(String),
}

impl DateParseError {
    /// True when the failure is an ambiguity flag rather than bad data.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }
}

/// A field that failed its format rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Date(#[from] DateParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
