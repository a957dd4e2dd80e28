//! Date normalization, the mark-done action, and the next-date query.

use chrono::NaiveDate;
use recur_engine::{mark_done, Completion, NextDateQuery, RecurError, TaskDates};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y%m%d").expect("test date must be valid")
}

fn normalized(date: &str, repeat: &str, today: &str) -> Result<String, RecurError> {
    let mut task = TaskDates::new(date, repeat);
    task.normalize(day(today))?;
    Ok(task.date)
}

// ---------------------------------------------------------------------------
// TaskDates::normalize
// ---------------------------------------------------------------------------

#[test]
fn empty_date_becomes_today() {
    assert_eq!(normalized("", "", "20240610").unwrap(), "20240610");
    assert_eq!(normalized("", "d 5", "20240610").unwrap(), "20240610");
}

#[test]
fn malformed_date_is_rejected() {
    assert_eq!(
        normalized("10.06.2024", "", "20240610"),
        Err(RecurError::InvalidDateFormat("10.06.2024".to_string()))
    );
}

#[test]
fn today_or_future_is_kept() {
    assert_eq!(normalized("20240610", "d 5", "20240610").unwrap(), "20240610");
    // The rule is not consulted for a date that is not in the past.
    assert_eq!(normalized("20250101", "zzz", "20240610").unwrap(), "20250101");
}

#[test]
fn past_one_off_moves_to_today() {
    assert_eq!(normalized("20240101", "", "20240610").unwrap(), "20240610");
}

#[test]
fn past_repeating_advances_by_rule() {
    assert_eq!(normalized("20240101", "d 7", "20240110").unwrap(), "20240115");
    assert_eq!(normalized("20230101", "y", "20240610").unwrap(), "20250101");
    assert_eq!(normalized("20240501", "m -1", "20240610").unwrap(), "20240630");
}

#[test]
fn past_repeating_never_lands_on_today() {
    // Anchor + 9 days is exactly today; the result must be strictly later.
    assert_eq!(normalized("20240601", "d 9", "20240610").unwrap(), "20240619");
}

#[test]
fn bad_rule_is_wrapped() {
    let err = normalized("20240101", "w 9", "20240610").unwrap_err();
    assert_eq!(
        err,
        RecurError::InvalidRepeatRule {
            rule: "w 9".to_string(),
            source: Box::new(RecurError::InvalidWeekday("9".to_string())),
        }
    );
    assert_eq!(err.to_string(), "invalid repeat rule: w 9");
}

#[test]
fn exhausted_search_is_wrapped() {
    let err = normalized("20000101", "w 1", "20240610").unwrap_err();
    match err {
        RecurError::InvalidRepeatRule { source, .. } => {
            assert!(matches!(*source, RecurError::NoMatchWithinBound { .. }));
        }
        other => panic!("expected InvalidRepeatRule, got {:?}", other),
    }
}

#[test]
fn normalize_is_idempotent() {
    let today = day("20240610");
    for (date, repeat) in [("20240101", "w 2,4"), ("", ""), ("20231231", "m 5"), ("20240901", "y")] {
        let mut task = TaskDates::new(date, repeat);
        task.normalize(today).unwrap();
        let first = task.clone();
        task.normalize(today).unwrap();
        assert_eq!(task, first, "second pass changed {:?}", (date, repeat));
    }
}

#[test]
fn task_dates_deserialize_with_missing_fields() {
    let task: TaskDates = serde_json::from_str(r#"{"date":"20240101"}"#).unwrap();
    assert_eq!(task, TaskDates::new("20240101", ""));
}

// ---------------------------------------------------------------------------
// mark_done
// ---------------------------------------------------------------------------

#[test]
fn done_one_off_is_removed() {
    let task = TaskDates::new("20240101", "");
    assert_eq!(mark_done(day("20240610"), &task).unwrap(), Completion::Remove);
}

#[test]
fn done_repeating_is_rescheduled() {
    let task = TaskDates::new("20240610", "d 1");
    assert_eq!(
        mark_done(day("20240610"), &task).unwrap(),
        Completion::Reschedule("20240611".to_string())
    );
}

#[test]
fn done_future_task_still_advances() {
    let task = TaskDates::new("20240620", "d 1");
    assert_eq!(
        mark_done(day("20240610"), &task).unwrap(),
        Completion::Reschedule("20240621".to_string())
    );
}

#[test]
fn done_errors_are_not_wrapped() {
    let task = TaskDates::new("20240610", "w 0");
    assert_eq!(
        mark_done(day("20240610"), &task),
        Err(RecurError::InvalidWeekday("0".to_string()))
    );
}

#[test]
fn completion_serializes_with_action_tag() {
    let reschedule = serde_json::to_value(Completion::Reschedule("20240611".to_string())).unwrap();
    assert_eq!(
        reschedule,
        serde_json::json!({"action": "reschedule", "date": "20240611"})
    );
    let remove = serde_json::to_value(Completion::Remove).unwrap();
    assert_eq!(remove, serde_json::json!({"action": "remove"}));
}

// ---------------------------------------------------------------------------
// NextDateQuery
// ---------------------------------------------------------------------------

#[test]
fn query_without_now_uses_today() {
    let query: NextDateQuery =
        serde_json::from_str(r#"{"date":"20230101","repeat":"d 3"}"#).unwrap();
    assert_eq!(query.evaluate(day("20230105")).unwrap(), "20230107");
}

#[test]
fn query_now_overrides_today() {
    let query = NextDateQuery {
        now: Some("20230115".to_string()),
        date: "20230101".to_string(),
        repeat: "y".to_string(),
    };
    assert_eq!(query.evaluate(day("20300101")).unwrap(), "20240101");
}

#[test]
fn query_empty_now_counts_as_absent() {
    let query = NextDateQuery {
        now: Some(String::new()),
        date: "20230101".to_string(),
        repeat: "d 3".to_string(),
    };
    assert_eq!(query.reference(day("20230105")).unwrap(), day("20230105"));
}

#[test]
fn query_rejects_bad_now() {
    let query = NextDateQuery {
        now: Some("tomorrow".to_string()),
        date: "20230101".to_string(),
        repeat: "y".to_string(),
    };
    assert_eq!(
        query.evaluate(day("20230105")),
        Err(RecurError::InvalidDateFormat("tomorrow".to_string()))
    );
}

#[test]
fn query_missing_repeat_is_empty_rule() {
    let query: NextDateQuery = serde_json::from_str(r#"{"date":"20230101"}"#).unwrap();
    assert_eq!(query.evaluate(day("20230105")), Err(RecurError::EmptyRule));
}
