//! Calendar date helpers.
//!
//! Dates cross every boundary as `YYYYMMDD` strings. Parsing is strict: exactly
//! eight ASCII digits forming a valid Gregorian date. chrono's `%Y` alone would
//! also take signs and wider years, so the shape is checked first.

use chrono::{Datelike, Days, NaiveDate};

/// chrono format string for the `YYYYMMDD` wire format.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Parse a strict `YYYYMMDD` string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Format a date as `YYYYMMDD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Add `years` calendar years.
///
/// Feb 29 carried into a non-leap year overflows to Mar 1 rather than being
/// clamped to Feb 28.
pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

pub(crate) fn add_days(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}

/// True when `date` is the final day of its month.
pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    add_days(date, 1).is_none_or(|next| next.day() == 1)
}

/// True when `date` counts as the second-to-last day of its month.
///
/// Two days ahead either lands on the 1st or has already left the month. The
/// second arm also holds on the last day itself, so a `-2` rule matches both of
/// a month's final two days.
pub fn is_second_to_last_day_of_month(date: NaiveDate) -> bool {
    match add_days(date, 2) {
        Some(later) => later.day() == 1 || later.month() != date.month(),
        None => true,
    }
}
