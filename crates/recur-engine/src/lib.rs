//! # recur-engine
//!
//! Next-occurrence computation for recurring tasks.
//!
//! A task carries an anchor date (`YYYYMMDD`) and a compact repeat rule such as
//! `"d 7"`, `"w 1,3,5"` or `"m 1,-1 2,8"`. The engine answers one question:
//! given the rule, the anchor, and today's date, when is the task next due?
//!
//! Everything here is a pure function over plain values. The engine never
//! reads a clock and never touches storage; callers pass "today" explicitly.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use recur_engine::next_date;
//!
//! let today = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
//! assert_eq!(next_date(today, "20230101", "d 3").unwrap(), "20230107");
//! ```
//!
//! ## Modules
//!
//! - [`rule`] — repeat-rule grammar → [`RepeatRule`]
//! - [`next`] — bounded forward search for the next occurrence
//! - [`policy`] — date normalization for create/update and the "done" action
//! - [`query`] — the `{now, date, repeat}` next-date query
//! - [`date`] — strict `YYYYMMDD` parsing and calendar helpers
//! - [`error`] — Error types

pub mod date;
pub mod error;
pub mod next;
pub mod policy;
pub mod query;
pub mod rule;

pub use error::RecurError;
pub use next::{next_date, next_occurrence, SEARCH_BOUND_DAYS};
pub use policy::{mark_done, Completion, TaskDates};
pub use query::NextDateQuery;
pub use rule::{MonthDays, RepeatRule};
