//! User-facing message extraction for failed API calls.
//!
//! The order is fixed so that error text stays stable across the console:
//! `detail` (a list is joined by each entry's `msg`), then `message`, then the
//! per-operation default.

use serde_json::Value;

use super::ApiError;

pub const ADD_EMPLOYEE_FAILED: &str = "Failed to add employee.";
pub const DELETE_EMPLOYEE_FAILED: &str = "Failed to delete employee.";
pub const MARK_ATTENDANCE_FAILED: &str = "Failed to mark attendance.";

/// Pick the most specific message carried by `err`, falling back to `default`.
pub fn error_message(err: &ApiError, default: &str) -> String {
    err.body()
        .and_then(message_from_body)
        .unwrap_or_else(|| default.to_string())
}

/// Apply the extraction chain to a decoded error body.
pub fn message_from_body(body: &Value) -> Option<String> {
    body.get("detail")
        .and_then(detail_text)
        .or_else(|| body.get("message").and_then(non_empty_text))
}

fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(non_empty_text).or_else(|| non_empty_text(item)))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        Value::Object(map) => map.get("msg").and_then(non_empty_text).or_else(|| non_empty_text(detail)),
        other => non_empty_text(other),
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.is_empty() { None } else { Some(text) }
}
