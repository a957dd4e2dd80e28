//! The next-date query: `{now, date, repeat}` as sent by a client.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::date;
use crate::error::{RecurError, Result};
use crate::next::next_date;

/// Parameters of a next-date lookup.
///
/// Field names follow the query string (`?now=...&date=...&repeat=...`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NextDateQuery {
    /// Reference date, `YYYYMMDD`. Falls back to the caller's today when absent.
    #[serde(default)]
    pub now: Option<String>,
    /// Anchor date, `YYYYMMDD`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub repeat: String,
}

impl NextDateQuery {
    /// Resolve the reference date: `now` if given, else `today`.
    ///
    /// An empty `now` counts as absent.
    pub fn reference(&self, today: NaiveDate) -> Result<NaiveDate> {
        match self.now.as_deref() {
            None | Some("") => Ok(today),
            Some(now) => {
                date::parse_date(now).ok_or_else(|| RecurError::InvalidDateFormat(now.to_string()))
            }
        }
    }

    /// Run the query.
    pub fn evaluate(&self, today: NaiveDate) -> Result<String> {
        let reference = self.reference(today)?;
        next_date(reference, &self.date, &self.repeat)
    }
}
