//! Repeat-rule grammar.
//!
//! A rule is `<kind>` or `<kind> <arg>[ <arg>]`, tokens separated by single
//! spaces:
//!
//! | Rule             | Meaning                                               |
//! |------------------|-------------------------------------------------------|
//! | `y`              | every year on the anchor's month and day              |
//! | `d 7`            | every 7 days (1..=400)                                |
//! | `w 1,4`          | every Monday and Thursday (1 = Monday .. 7 = Sunday)  |
//! | `m 1,15,-1`      | the 1st, the 15th and the last day of every month     |
//! | `m -2 1,7`       | second-to-last day of January and July                |

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::date;
use crate::error::{RecurError, Result};

/// Largest accepted step for `d <n>`.
pub const MAX_DAILY_INTERVAL: u32 = 400;

/// A validated repeat rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RepeatRule {
    Yearly,
    DailyInterval {
        step: u32,
    },
    /// ISO weekday numbers, 1 = Monday .. 7 = Sunday.
    Weekly {
        weekdays: BTreeSet<u32>,
    },
    /// `months: None` selects every month.
    Monthly {
        days: MonthDays,
        months: Option<BTreeSet<u32>>,
    },
}

/// Day selector of a monthly rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthDays {
    /// Explicit days of month, 1..=31.
    pub days: BTreeSet<u32>,
    /// `-1`: the last day of the month.
    pub last_day: bool,
    /// `-2`: the second-to-last day of the month.
    pub second_to_last_day: bool,
}

impl MonthDays {
    /// True when `date` is one of the selected days of its month.
    pub fn matches(&self, date: NaiveDate) -> bool {
        self.days.contains(&date.day())
            || (self.last_day && date::is_last_day_of_month(date))
            || (self.second_to_last_day && date::is_second_to_last_day_of_month(date))
    }
}

impl RepeatRule {
    /// Parse a rule string. Equivalent to `s.parse::<RepeatRule>()`.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(RecurError::EmptyRule);
        }

        let parts: Vec<&str> = s.split(' ').collect();
        match parts[0] {
            "y" => Ok(RepeatRule::Yearly),
            "d" => parse_daily(&parts),
            "w" => parse_weekly(&parts),
            "m" => parse_monthly(&parts),
            other => Err(RecurError::UnsupportedRule(other.to_string())),
        }
    }
}

fn parse_daily(parts: &[&str]) -> Result<RepeatRule> {
    let err = || RecurError::InvalidDailyInterval(parts[1..].join(" "));
    let [_, arg] = parts else {
        return Err(err());
    };
    let step: u32 = arg.parse().map_err(|_| err())?;
    if step == 0 || step > MAX_DAILY_INTERVAL {
        return Err(err());
    }
    Ok(RepeatRule::DailyInterval { step })
}

fn parse_weekly(parts: &[&str]) -> Result<RepeatRule> {
    let [_, arg] = parts else {
        return Err(RecurError::InvalidWeekday(parts[1..].join(" ")));
    };
    let weekdays = parse_list(arg, 1..=7, RecurError::InvalidWeekday)?;
    Ok(RepeatRule::Weekly { weekdays })
}

fn parse_monthly(parts: &[&str]) -> Result<RepeatRule> {
    if !(2..=3).contains(&parts.len()) {
        return Err(RecurError::InvalidMonthDay(parts[1..].join(" ")));
    }

    let mut days = MonthDays::default();
    for entry in parts[1].split(',') {
        match entry.parse::<i32>() {
            Ok(-1) => days.last_day = true,
            Ok(-2) => days.second_to_last_day = true,
            Ok(day @ 1..=31) => {
                days.days.insert(day as u32);
            }
            _ => return Err(RecurError::InvalidMonthDay(entry.to_string())),
        }
    }

    let months = match parts.get(2) {
        Some(arg) => Some(parse_list(arg, 1..=12, RecurError::InvalidMonth)?),
        None => None,
    };

    Ok(RepeatRule::Monthly { days, months })
}

/// Parse a comma-separated list of integers, each within `range`.
fn parse_list(
    arg: &str,
    range: std::ops::RangeInclusive<u32>,
    err: fn(String) -> RecurError,
) -> Result<BTreeSet<u32>> {
    arg.split(',')
        .map(|entry| match entry.parse::<u32>() {
            Ok(n) if range.contains(&n) => Ok(n),
            _ => Err(err(entry.to_string())),
        })
        .collect()
}

impl FromStr for RepeatRule {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self> {
        RepeatRule::parse(s)
    }
}

fn join(values: impl IntoIterator<Item = String>) -> String {
    values.into_iter().collect::<Vec<_>>().join(",")
}

/// Canonical rule string: lists sorted and de-duplicated, `-1` and `-2` last.
impl fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatRule::Yearly => write!(f, "y"),
            RepeatRule::DailyInterval { step } => write!(f, "d {}", step),
            RepeatRule::Weekly { weekdays } => {
                write!(f, "w {}", join(weekdays.iter().map(u32::to_string)))
            }
            RepeatRule::Monthly { days, months } => {
                let mut entries: Vec<String> = days.days.iter().map(u32::to_string).collect();
                if days.last_day {
                    entries.push("-1".to_string());
                }
                if days.second_to_last_day {
                    entries.push("-2".to_string());
                }
                write!(f, "m {}", join(entries))?;
                if let Some(months) = months {
                    write!(f, " {}", join(months.iter().map(u32::to_string)))?;
                }
                Ok(())
            }
        }
    }
}
