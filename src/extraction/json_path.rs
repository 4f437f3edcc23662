//! JSON path resolution.
//!
//! Resolves dot-notation paths like "low_price.min_allowed" to values in the
//! `violation_details` bag and converts them leniently, since the pipeline
//! has written numbers both as JSON numbers and as unit-suffixed strings.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// Leading numeric part of strings like "15 kg", "1500.50" or "-2,5".
    static ref LEADING_NUMBER: Regex = Regex::new(r"^\s*(-?\d+(?:[.,]\d+)?)").unwrap();
}

/// Resolve a dot-notation path to a value in JSON.
///
/// # Examples
/// ```
/// use brandguard_core::extraction::resolve_json_path;
/// use serde_json::json;
/// let data = json!({"low_price": {"min_allowed": 1200}});
/// let value = resolve_json_path(&data, "low_price.min_allowed");
/// assert_eq!(value, Some(&json!(1200)));
/// ```
pub fn resolve_json_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(data);
    }

    let mut current = data;
    for part in path.split('.') {
        match current {
            Value::Object(obj) => {
                current = obj.get(part)?;
            }
            Value::Array(arr) => {
                let index: usize = part.parse().ok()?;
                current = arr.get(index)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Convert a JSON value to a float if possible.
///
/// Strings are parsed from their leading number, so "15 kg" yields 15.0.
pub fn value_to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => LEADING_NUMBER
            .captures(s)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().replace(',', ".").parse().ok()),
        _ => None,
    }
}

/// Convert a JSON value to a non-negative integer if possible.
pub fn value_to_count(value: &Value) -> Option<u32> {
    let f = value_to_float(value)?;
    if f.is_finite() && f >= 0.0 {
        Some(f.round() as u32)
    } else {
        None
    }
}

/// Truthiness as the pipeline's consumers have always read the bag:
/// absent, null, false, zero and empty string are all "not set".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
