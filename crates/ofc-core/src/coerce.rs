//! Numeric coercion of raw provider values.
//!
//! Provider payloads carry amounts as JSON numbers, numeric strings, or
//! occasionally something else entirely. Coercion follows the loose rules
//! the upstream services were built around: numeric strings parse, booleans
//! count as `1`/`0`, and anything that does not read as a number is treated
//! as unknown.

use serde_json::Value;

/// Coerce a raw value into a number.
///
/// Returns `None` for `null`, objects, multi-element arrays and strings that
/// do not parse as a number. An empty (or all-whitespace) string is `0`, a
/// single-element array coerces as its only element, and `0x`-prefixed
/// strings are read as hexadecimal integers.
///
/// The result may be infinite (for example `"1e400"`); callers that need a
/// finite value should go through [`normalize_field`].
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_numeric_str(text),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [single] => to_number(single),
            _ => None,
        },
    }
}

fn parse_numeric_str(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16).ok().map(|n| n as f64);
    }

    // `f64::from_str` also accepts "nan" and "inf"; neither is an amount.
    let parsed: f64 = trimmed.parse().ok()?;
    if parsed.is_nan() {
        None
    } else {
        Some(parsed)
    }
}

/// Coerce an optional raw value into a finite number, defaulting to `0`.
///
/// Absent values, `null`, values that fail [`to_number`] and values that
/// coerce to an infinity all become `0.0`. This is the single place where
/// malformed numerics are absorbed: nothing downstream ever sees `NaN` or an
/// infinity from the inputs.
pub fn normalize_field(value: Option<&Value>) -> f64 {
    value
        .and_then(to_number)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Coerce a raw value into a whole number, as used for years and quarters.
///
/// Fractional or non-finite values are rejected.
pub(crate) fn to_integer(value: &Value) -> Option<i64> {
    to_number(value)
        .filter(|n| n.is_finite() && n.fract() == 0.0)
        .filter(|n| n.abs() <= i64::MAX as f64)
        .map(|n| n as i64)
}
