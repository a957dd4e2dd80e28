//! Next-occurrence search.
//!
//! Every rule walks forward from the anchor date and returns the first date
//! strictly after the reference date. The anchor is only a seed: it is never
//! returned itself, and an anchor already ahead of the reference still advances
//! by at least one step.

use chrono::{Datelike, NaiveDate};

use crate::date;
use crate::error::{RecurError, Result};
use crate::rule::RepeatRule;

/// Upper bound, in single-day steps, for weekly and monthly searches.
pub const SEARCH_BOUND_DAYS: u32 = 3650;

/// Compute the next due date for string inputs.
///
/// `anchor` must be `YYYYMMDD`; the result uses the same format.
///
/// # Errors
/// - `RecurError::EmptyRule` if `rule` is empty
/// - `RecurError::InvalidAnchorDate` if `anchor` is not a valid `YYYYMMDD` date
/// - any parse error from [`RepeatRule::parse`]
/// - any search error from [`next_occurrence`]
pub fn next_date(reference: NaiveDate, anchor: &str, rule: &str) -> Result<String> {
    if rule.is_empty() {
        return Err(RecurError::EmptyRule);
    }
    let anchor_date = date::parse_date(anchor)
        .ok_or_else(|| RecurError::InvalidAnchorDate(anchor.to_string()))?;
    let rule = RepeatRule::parse(rule)?;

    next_occurrence(reference, anchor_date, &rule).map(date::format_date)
}

/// Compute the first date after `reference` produced by `rule` from `anchor`.
///
/// # Errors
/// - `RecurError::NoMatchWithinBound` if a weekly or monthly walk finds nothing
///   within [`SEARCH_BOUND_DAYS`] days of the anchor
/// - `RecurError::DateOutOfRange` if stepping leaves chrono's date range
pub fn next_occurrence(
    reference: NaiveDate,
    anchor: NaiveDate,
    rule: &RepeatRule,
) -> Result<NaiveDate> {
    match rule {
        RepeatRule::Yearly => {
            let mut next = anchor;
            loop {
                next = date::add_years(next, 1).ok_or(RecurError::DateOutOfRange)?;
                if next > reference {
                    return Ok(next);
                }
            }
        }
        RepeatRule::DailyInterval { step } => next_by_interval(reference, anchor, *step),
        RepeatRule::Weekly { weekdays } => walk_days(reference, anchor, rule, |d| {
            weekdays.contains(&d.weekday().number_from_monday())
        }),
        RepeatRule::Monthly { days, months } => walk_days(reference, anchor, rule, |d| {
            months.as_ref().is_none_or(|m| m.contains(&d.month())) && days.matches(d)
        }),
    }
}

/// Smallest `anchor + k * step` (k >= 1) strictly after `reference`.
fn next_by_interval(reference: NaiveDate, anchor: NaiveDate, step: u32) -> Result<NaiveDate> {
    let step = u64::from(step);
    let behind = (reference - anchor).num_days();
    // Whole steps needed to pass the reference; at least one.
    let k = if behind < 0 {
        1
    } else {
        behind as u64 / step + 1
    };
    k.checked_mul(step)
        .and_then(|days| date::add_days(anchor, days))
        .ok_or(RecurError::DateOutOfRange)
}

/// Step one day at a time from `anchor`, returning the first date after
/// `reference` accepted by `is_match`.
fn walk_days(
    reference: NaiveDate,
    anchor: NaiveDate,
    rule: &RepeatRule,
    is_match: impl Fn(NaiveDate) -> bool,
) -> Result<NaiveDate> {
    let mut candidate = anchor;
    for _ in 0..SEARCH_BOUND_DAYS {
        candidate = candidate.succ_opt().ok_or(RecurError::DateOutOfRange)?;
        if candidate > reference && is_match(candidate) {
            return Ok(candidate);
        }
    }
    Err(RecurError::NoMatchWithinBound {
        rule: rule.to_string(),
        bound: SEARCH_BOUND_DAYS,
    })
}
