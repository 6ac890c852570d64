//! Jalali (solar Hijri) calendar arithmetic.
//!
//! Dates are counted as days since Jalali 0001/01/01 and mapped onto the
//! proleptic Gregorian calendar through chrono's day-from-CE numbering.
//! Leap years follow the 33-year cycle: a year is leap when its remainder
//! modulo 33 is one of 1, 5, 9, 13, 17, 22, 26 or 30.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const LEAP_REMAINDERS: [i32; 8] = [1, 5, 9, 13, 17, 22, 26, 30];
const CYCLE_YEARS: i32 = 33;
const CYCLE_DAYS: i64 = 33 * 365 + 8;
const MONTH_DAYS: [u32; 12] = [31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29];

/// `num_days_from_ce` of Jalali 0001/01/01 (Gregorian 0622-03-21).
const EPOCH_DAYS_FROM_CE: i64 = 226_895;

/// Largest Jalali year accepted by [`JalaliDate::from_ymd_opt`].
pub const MAX_YEAR: i32 = 9_000;

/// A validated date in the Jalali calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JalaliDate {
    year: i32,
    month: u32,
    day: u32,
}

/// Returns true when `year` has 366 days (Esfand has 30 days).
pub fn is_leap_year(year: i32) -> bool {
    LEAP_REMAINDERS.contains(&year.rem_euclid(CYCLE_YEARS))
}

/// Number of days in a Jalali month, or `None` when the month is out of range.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1..=11 => Some(MONTH_DAYS[(month - 1) as usize]),
        12 if is_leap_year(year) => Some(30),
        12 => Some(29),
        _ => None,
    }
}

/// Days from 0001/01/01 to the first day of `year`.
fn days_before_year(year: i32) -> i64 {
    let elapsed = i64::from(year - 1);
    let cycles = elapsed.div_euclid(i64::from(CYCLE_YEARS));
    let remainder = elapsed.rem_euclid(i64::from(CYCLE_YEARS));
    let partial_leaps = LEAP_REMAINDERS
        .iter()
        .filter(|&&r| i64::from(r) <= remainder)
        .count() as i64;
    365 * elapsed + cycles * 8 + partial_leaps
}

fn days_before_month(month: u32) -> i64 {
    MONTH_DAYS[..(month - 1) as usize]
        .iter()
        .map(|&days| i64::from(days))
        .sum()
}

impl JalaliDate {
    /// Builds a date, rejecting impossible combinations such as 1404/12/30.
    pub fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=MAX_YEAR).contains(&year) {
            return None;
        }
        let max_day = days_in_month(year, month)?;
        if day == 0 || day > max_day {
            return None;
        }
        Some(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Zero-based day count since 0001/01/01.
    fn ordinal_days(&self) -> i64 {
        days_before_year(self.year) + days_before_month(self.month) + i64::from(self.day - 1)
    }

    /// Converts to the proleptic Gregorian calendar.
    pub fn to_gregorian(&self) -> Option<NaiveDate> {
        let days = EPOCH_DAYS_FROM_CE + self.ordinal_days();
        NaiveDate::from_num_days_from_ce_opt(i32::try_from(days).ok()?)
    }

    /// Converts a Gregorian date; `None` for dates before the Jalali epoch.
    pub fn from_gregorian(date: NaiveDate) -> Option<Self> {
        let days = i64::from(date.num_days_from_ce()) - EPOCH_DAYS_FROM_CE;
        if days < 0 {
            return None;
        }
        let mut year = i32::try_from(days * i64::from(CYCLE_YEARS) / CYCLE_DAYS).ok()? + 1;
        while days_before_year(year + 1) <= days {
            year += 1;
        }
        while days_before_year(year) > days {
            year -= 1;
        }
        let mut remaining = days - days_before_year(year);
        let mut month = 1;
        loop {
            let length = i64::from(days_in_month(year, month)?);
            if remaining < length {
                break;
            }
            remaining -= length;
            month += 1;
        }
        Self::from_ymd_opt(year, month, u32::try_from(remaining).ok()? + 1)
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}
