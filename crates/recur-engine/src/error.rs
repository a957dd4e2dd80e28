//! Error types for rule parsing and next-date computation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurError {
    #[error("repeat rule is empty")]
    EmptyRule,

    #[error("invalid daily interval: {0}")]
    InvalidDailyInterval(String),

    #[error("invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("invalid day of month: {0}")]
    InvalidMonthDay(String),

    #[error("invalid month: {0}")]
    InvalidMonth(String),

    #[error("unsupported repeat rule: {0}")]
    UnsupportedRule(String),

    #[error("invalid anchor date: {0}")]
    InvalidAnchorDate(String),

    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),

    /// The bounded weekly/monthly walk ran out of steps.
    #[error("no date matches '{rule}' within {bound} days")]
    NoMatchWithinBound { rule: String, bound: u32 },

    #[error("date out of supported range")]
    DateOutOfRange,

    /// A past-due repeating record could not be advanced.
    #[error("invalid repeat rule: {rule}")]
    InvalidRepeatRule {
        rule: String,
        #[source]
        source: Box<RecurError>,
    },
}

/// Convenience alias used throughout recur-engine.
pub type Result<T> = std::result::Result<T, RecurError>;
