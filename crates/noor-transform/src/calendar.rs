//! Dual-calendar visit date resolution.
//!
//! Export cells carry Jalali dates (`1403/02/12 14:30`), Gregorian ISO
//! timestamps (`2024-05-01T14:30:00`), compact dates (`14030212`) and
//! spreadsheet serial day numbers (`45413`). The calendar is decided from the
//! year alone:
//!
//! | year        | calendar  |
//! |-------------|-----------|
//! | 1 - 1500    | Jalali    |
//! | 1700 and up | Gregorian |
//! | otherwise   | rejected  |
//!
//! The first date-like token in the cell is used, so a leading weekday or
//! label is skipped. Day-first strings (`01/05/2024`) are never guessed; they fail with
//! [`DateParseError::Ambiguous`].

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use noor_model::text::normalize_digits;
use noor_model::{CalendarSource, DateParseError, JalaliDate, ResolvedDate};
use regex::{Captures, Regex};

/// Years at or below this are Jalali.
pub const MAX_JALALI_YEAR: i32 = 1500;
/// Years at or above this are Gregorian.
pub const MIN_GREGORIAN_YEAR: i32 = 1700;

const SECONDS_PER_DAY: f64 = 86_400.0;

static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(?:^|\D)(?P<year>\d{3,4})[/.\-](?P<month>\d{1,2})[/.\-](?P<day>\d{1,2})(?P<rest>(?:\D.*)?)$")
        .expect("Invalid date regex")
});

static COMPACT_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<year>\d{4})(?P<month>\d{2})(?P<day>\d{2})(?P<rest>(?:[T\s].*)?)$")
        .expect("Invalid compact date regex")
});

static TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:T|\s+)(?P<hour>\d{1,2}):(?P<minute>\d{1,2})(?::(?P<second>\d{1,2})(?:\.\d+)?)?(?:\D|$)")
        .expect("Invalid time regex")
});

static DAY_FIRST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)\d{1,2}[/.\-]\d{1,2}[/.\-]\d{4}(?:\D|$)").expect("Invalid day-first regex")
});

static SERIAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(?:\.\d+)?$").expect("Invalid serial date regex"));

/// Classify a year into the calendar it was written in.
pub fn detect_calendar(year: i32) -> CalendarSource {
    match year {
        1..=MAX_JALALI_YEAR => CalendarSource::Jalali,
        MIN_GREGORIAN_YEAR.. => CalendarSource::Gregorian,
        _ => CalendarSource::Unknown,
    }
}

/// Resolve a visit date cell.
///
/// Returns `Ok(None)` for an empty cell; an absent date is not an error.
pub fn resolve_date(value: &str) -> Result<Option<ResolvedDate>, DateParseError> {
    let text = clean_date_text(value);
    if text.is_empty() {
        return Ok(None);
    }

    if SERIAL_REGEX.is_match(&text) {
        return resolve_serial(&text).map(Some);
    }
    let caps = COMPACT_DATE_REGEX
        .captures(&text)
        .or_else(|| DATE_REGEX.captures(&text));
    let date_start = caps
        .as_ref()
        .and_then(|caps| caps.name("year"))
        .map(|year| year.start());
    if let Some(day_first) = DAY_FIRST_REGEX.find(&text)
        && date_start.is_none_or(|start| day_first.start() < start)
    {
        return Err(DateParseError::Ambiguous(text));
    }
    let caps = caps.ok_or_else(|| DateParseError::Malformed(text.clone()))?;

    let year = number(&caps, "year", &text)?;
    let month = number(&caps, "month", &text)?;
    let day = number(&caps, "day", &text)?;
    let year = i32::try_from(year).map_err(|_| DateParseError::Malformed(text.clone()))?;

    let time = caps
        .name("rest")
        .map(|rest| rest.as_str())
        .filter(|rest| TIME_REGEX.is_match(rest))
        .map(parse_time)
        .transpose()?;

    let source = detect_calendar(year);
    let gregorian = to_gregorian(source, year, month, day)?;
    Ok(Some(ResolvedDate::new(source, gregorian, time)))
}

/// Gregorian date for `year/month/day` written in `source`.
pub fn to_gregorian(
    source: CalendarSource,
    year: i32,
    month: u32,
    day: u32,
) -> Result<NaiveDate, DateParseError> {
    match source {
        CalendarSource::Jalali => JalaliDate::from_ymd_opt(year, month, day)
            .and_then(|date| JalaliDate::to_gregorian(&date))
            .ok_or_else(|| {
                DateParseError::InvalidCalendarDate(format!("{year:04}/{month:02}/{day:02}"))
            }),
        CalendarSource::Gregorian => NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            DateParseError::InvalidCalendarDate(format!("{year:04}-{month:02}-{day:02}"))
        }),
        CalendarSource::Unknown => Err(DateParseError::YearOutOfRange(year)),
    }
}

fn clean_date_text(value: &str) -> String {
    normalize_digits(value)
        .chars()
        .filter(|ch| !matches!(ch, '\u{200b}' | '\u{200c}' | '\u{200d}'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn number(caps: &Captures<'_>, group: &str, text: &str) -> Result<u32, DateParseError> {
    caps.name(group)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| DateParseError::Malformed(text.to_string()))
}

fn parse_time(rest: &str) -> Result<NaiveTime, DateParseError> {
    let caps = TIME_REGEX
        .captures(rest)
        .ok_or_else(|| DateParseError::InvalidTime(rest.trim().to_string()))?;
    let invalid = || DateParseError::InvalidTime(caps[0].trim().to_string());
    let hour = number(&caps, "hour", rest).map_err(|_| invalid())?;
    let minute = number(&caps, "minute", rest).map_err(|_| invalid())?;
    let second = match caps.name("second") {
        Some(_) => number(&caps, "second", rest).map_err(|_| invalid())?,
        None => 0,
    };
    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)
}

/// Spreadsheet serial day number, counted from 1899-12-30.
fn resolve_serial(text: &str) -> Result<ResolvedDate, DateParseError> {
    let malformed = || DateParseError::Malformed(text.to_string());
    let serial: f64 = text.parse().map_err(|_| malformed())?;
    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    let datetime = NaiveDate::from_ymd_opt(1899, 12, 30)
        .map(|origin| origin.and_time(NaiveTime::MIN))
        .zip(TimeDelta::try_seconds(seconds))
        .and_then(|(origin, delta)| origin.checked_add_signed(delta))
        .ok_or_else(malformed)?;
    let time = (seconds % 86_400 != 0).then(|| datetime.time());
    Ok(ResolvedDate::new(
        CalendarSource::Gregorian,
        datetime.date(),
        time,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn resolved(value: &str) -> ResolvedDate {
        resolve_date(value).unwrap().unwrap()
    }

    #[test]
    fn detects_calendar_from_year() {
        assert_eq!(detect_calendar(1403), CalendarSource::Jalali);
        assert_eq!(detect_calendar(1), CalendarSource::Jalali);
        assert_eq!(detect_calendar(2024), CalendarSource::Gregorian);
        assert_eq!(detect_calendar(1600), CalendarSource::Unknown);
        assert_eq!(detect_calendar(0), CalendarSource::Unknown);
    }

    #[test]
    fn empty_cell_is_absent_not_an_error() {
        assert_eq!(resolve_date(""), Ok(None));
        assert_eq!(resolve_date("  nan "), Ok(None));
    }

    #[test]
    fn jalali_with_time() {
        let date = resolved("1403/02/12 14:30");
        assert_eq!(date.calendar_source, CalendarSource::Jalali);
        assert_eq!(date.gregorian_date, ymd(2024, 5, 1));
        assert_eq!(date.time_of_day, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert!(!date.defaulted_time);
    }

    #[test]
    fn persian_digits_and_dashes() {
        let date = resolved("۱۴۰۳-۰۱-۰۱");
        assert_eq!(date.gregorian_date, ymd(2024, 3, 20));
        assert!(date.defaulted_time);
    }

    #[test]
    fn gregorian_iso_timestamp() {
        let date = resolved("2024-05-01T14:30:05");
        assert_eq!(date.calendar_source, CalendarSource::Gregorian);
        assert_eq!(date.visit_date_db(), "2024-05-01T14:30:05");
    }

    #[test]
    fn compact_date() {
        assert_eq!(resolved("14030212").gregorian_date, ymd(2024, 5, 1));
        assert_eq!(resolved("20240501").gregorian_date, ymd(2024, 5, 1));
    }

    #[test]
    fn spreadsheet_serial_dates() {
        let date = resolved("45413");
        assert_eq!(date.gregorian_date, ymd(2024, 5, 1));
        assert!(date.defaulted_time);

        let date = resolved("45413.5");
        assert_eq!(date.time_of_day, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert!(!date.defaulted_time);
    }

    #[test]
    fn jalali_leap_year_boundary() {
        assert_eq!(resolved("1403/12/30").gregorian_date, ymd(2025, 3, 20));
        assert_eq!(resolved("1403/12/29").gregorian_date, ymd(2025, 3, 19));
        assert_eq!(
            resolve_date("1404/12/30"),
            Err(DateParseError::InvalidCalendarDate("1404/12/30".to_string()))
        );
    }

    #[test]
    fn gregorian_impossible_date_fails() {
        assert!(matches!(
            resolve_date("2023-02-30"),
            Err(DateParseError::InvalidCalendarDate(_))
        ));
        assert!(resolve_date("2024-02-29").is_ok());
    }

    #[test]
    fn year_between_calendars_is_rejected() {
        assert_eq!(
            resolve_date("1600/01/01"),
            Err(DateParseError::YearOutOfRange(1600))
        );
    }

    #[test]
    fn day_first_dates_are_flagged() {
        let err = resolve_date("01/05/2024").unwrap_err();
        assert!(err.is_ambiguous());
    }

    #[test]
    fn bad_time_is_rejected() {
        assert_eq!(
            resolve_date("1403/02/12 25:10"),
            Err(DateParseError::InvalidTime("25:10".to_string()))
        );
    }

    #[test]
    fn trailing_text_without_time_is_ignored() {
        let date = resolved("1403/02/12 later");
        assert_eq!(date.gregorian_date, ymd(2024, 5, 1));
        assert!(date.defaulted_time);
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            resolve_date("tomorrow"),
            Err(DateParseError::Malformed(_))
        ));
        assert!(matches!(
            resolve_date("1403/02/123"),
            Err(DateParseError::Malformed(_))
        ));
    }
}
