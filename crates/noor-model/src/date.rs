//! Resolved visit dates and their output projections.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::jalali::JalaliDate;

/// Calendar a source date string was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarSource {
    Jalali,
    Gregorian,
    /// Year outside both supported ranges; never stored on a [`ResolvedDate`].
    Unknown,
}

impl CalendarSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jalali => "jalali",
            Self::Gregorian => "gregorian",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CalendarSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A visit date resolved to a single Gregorian calendar date and time.
///
/// The four output date fields are projections computed on demand; only the
/// Gregorian date and time are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedDate {
    pub calendar_source: CalendarSource,
    pub gregorian_date: NaiveDate,
    pub time_of_day: NaiveTime,
    /// True when the input carried no time component (time is midnight).
    pub defaulted_time: bool,
}

impl ResolvedDate {
    pub fn new(
        calendar_source: CalendarSource,
        gregorian_date: NaiveDate,
        time_of_day: Option<NaiveTime>,
    ) -> Self {
        Self {
            calendar_source,
            gregorian_date,
            time_of_day: time_of_day.unwrap_or(NaiveTime::MIN),
            defaulted_time: time_of_day.is_none(),
        }
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.gregorian_date.and_time(self.time_of_day)
    }

    pub fn jalali_date(&self) -> Option<JalaliDate> {
        JalaliDate::from_gregorian(self.gregorian_date)
    }

    /// Gregorian ISO date (`YYYY-MM-DD`) for storage and queries.
    pub fn visit_date(&self) -> String {
        self.gregorian_date.format("%Y-%m-%d").to_string()
    }

    /// Jalali date (`YYYY/MM/DD`) for display.
    pub fn visit_date_ui(&self) -> String {
        match self.jalali_date() {
            Some(jalali) => jalali.to_string(),
            None => self.visit_date(),
        }
    }

    /// Jalali date with `HH:MM` time for display.
    pub fn visit_datetime_ui(&self) -> String {
        let time = self.time_of_day.format("%H:%M");
        match self.jalali_date() {
            Some(jalali) => format!("{jalali} {time}"),
            None => format!("{} {time}", self.visit_date()),
        }
    }

    /// Full ISO datetime (`YYYY-MM-DDTHH:MM:SS`) for precise storage.
    pub fn visit_date_db(&self) -> String {
        self.datetime().format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
