//! Date normalization for task records.
//!
//! Every mutation of a task (create, update, mark done) has to leave it with a
//! date that is not in the past. [`TaskDates::normalize`] covers create and
//! update; [`mark_done`] covers completing one occurrence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date;
use crate::error::{RecurError, Result};
use crate::next::next_date;

/// The scheduling fields of a task record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDates {
    /// `YYYYMMDD`, or empty for "today".
    #[serde(default)]
    pub date: String,
    /// Repeat rule, or empty for a one-off task.
    #[serde(default)]
    pub repeat: String,
}

impl TaskDates {
    /// Build a record from its stored date and repeat rule.
    pub fn new(date: impl Into<String>, repeat: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            repeat: repeat.into(),
        }
    }

    /// Bring `date` up to `today` or later.
    ///
    /// - empty date: set to today
    /// - date today or later: left as is
    /// - past date, no rule: set to today
    /// - past date with a rule: advanced to the rule's next occurrence
    ///
    /// # Errors
    /// - `RecurError::InvalidDateFormat` if `date` is set but not `YYYYMMDD`
    /// - `RecurError::InvalidRepeatRule` if the rule cannot advance a past date
    pub fn normalize(&mut self, today: NaiveDate) -> Result<()> {
        if self.date.is_empty() {
            self.date = date::format_date(today);
            return Ok(());
        }

        let current = date::parse_date(&self.date)
            .ok_or_else(|| RecurError::InvalidDateFormat(self.date.clone()))?;
        if current >= today {
            return Ok(());
        }

        if self.repeat.is_empty() {
            self.date = date::format_date(today);
        } else {
            self.date = next_date(today, &self.date, &self.repeat).map_err(|e| {
                RecurError::InvalidRepeatRule {
                    rule: self.repeat.clone(),
                    source: Box::new(e),
                }
            })?;
        }
        Ok(())
    }
}

/// Outcome of marking one occurrence of a task as done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "date", rename_all = "snake_case")]
pub enum Completion {
    /// Move the task to this `YYYYMMDD` date.
    Reschedule(String),
    /// One-off task: delete it.
    Remove,
}

/// Decide what happens to a task when its current occurrence is done.
///
/// Unlike [`TaskDates::normalize`], the stored date is always advanced, even if
/// it lies in the future, and rule errors are returned unwrapped.
pub fn mark_done(now: NaiveDate, task: &TaskDates) -> Result<Completion> {
    if task.repeat.is_empty() {
        return Ok(Completion::Remove);
    }
    next_date(now, &task.date, &task.repeat).map(Completion::Reschedule)
}
