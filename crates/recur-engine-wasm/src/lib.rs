//! WASM bindings for recur-engine.
//!
//! Exposes next-date lookup, task normalization, mark-done and rule parsing to
//! JavaScript via `wasm-bindgen`. Records are passed as JSON strings and dates
//! as `YYYYMMDD` strings. The engine never reads a clock, so every call that
//! needs "today" takes it from the caller.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p recur-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/recur-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/recur_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use recur_engine::{date, NextDateQuery, RepeatRule, TaskDates};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: string-typed errors, converted to JsValue at the export boundary
// ---------------------------------------------------------------------------

fn parse_today(s: &str) -> Result<NaiveDate, String> {
    date::parse_date(s).ok_or_else(|| format!("Invalid today '{}': expected YYYYMMDD", s))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn next_date_impl(query_json: &str, today: &str) -> Result<String, String> {
    let query: NextDateQuery =
        serde_json::from_str(query_json).map_err(|e| format!("Invalid query JSON: {}", e))?;
    let today = parse_today(today)?;
    query.evaluate(today).map_err(|e| e.to_string())
}

fn normalize_task_impl(task_json: &str, today: &str) -> Result<String, String> {
    let mut task: TaskDates =
        serde_json::from_str(task_json).map_err(|e| format!("Invalid task JSON: {}", e))?;
    let today = parse_today(today)?;
    task.normalize(today).map_err(|e| e.to_string())?;
    to_json(&task)
}

fn mark_done_impl(task_json: &str, now: &str) -> Result<String, String> {
    let task: TaskDates =
        serde_json::from_str(task_json).map_err(|e| format!("Invalid task JSON: {}", e))?;
    let now = parse_today(now)?;
    let completion = recur_engine::mark_done(now, &task).map_err(|e| e.to_string())?;
    to_json(&completion)
}

fn parse_rule_impl(rule: &str) -> Result<String, String> {
    let rule = RepeatRule::parse(rule).map_err(|e| e.to_string())?;
    to_json(&rule)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the next due date.
///
/// `query_json` is `{"now"?, "date", "repeat"}`; when `now` is missing or empty,
/// `today` is used as the reference. Returns the `YYYYMMDD` result.
#[wasm_bindgen(js_name = "nextDate")]
pub fn next_date(query_json: &str, today: &str) -> Result<String, JsValue> {
    next_date_impl(query_json, today).map_err(|e| JsValue::from_str(&e))
}

/// Normalize a `{"date", "repeat"}` record before it is stored.
///
/// Returns the record as JSON with its date brought up to `today` or later.
#[wasm_bindgen(js_name = "normalizeTask")]
pub fn normalize_task(task_json: &str, today: &str) -> Result<String, JsValue> {
    normalize_task_impl(task_json, today).map_err(|e| JsValue::from_str(&e))
}

/// Mark the current occurrence of a `{"date", "repeat"}` record as done.
///
/// Returns `{"action":"reschedule","date":"YYYYMMDD"}` or `{"action":"remove"}`.
#[wasm_bindgen(js_name = "markDone")]
pub fn mark_done(task_json: &str, now: &str) -> Result<String, JsValue> {
    mark_done_impl(task_json, now).map_err(|e| JsValue::from_str(&e))
}

/// Parse a repeat rule and return its structure as JSON.
#[wasm_bindgen(js_name = "parseRule")]
pub fn parse_rule(rule: &str) -> Result<String, JsValue> {
    parse_rule_impl(rule).map_err(|e| JsValue::from_str(&e))
}
