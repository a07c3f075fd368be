//! Tolerant scalar coercion shared by catalog rows and rule documents.
//!
//! Every numeric read in the engine goes through [`coerce_f64`]: absent values, unparsable
//! strings and non-finite results all collapse to `0.0`, so a malformed document simply
//! contributes nothing instead of failing an audit.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce any JSON scalar into a finite `f64`.
pub fn coerce_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Null => 0.0,
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(raw) => parse_f64_lenient(raw),
        Value::Array(_) | Value::Object(_) => 0.0,
    };

    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Parse a numeric string, accepting `,` as the decimal separator.
pub fn parse_f64_lenient(raw: &str) -> f64 {
    parse_f64(raw).unwrap_or(0.0)
}

fn parse_f64(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Finite number carried by a JSON number or numeric string; `None` for anything else.
pub fn numeric_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        Value::String(raw) => parse_f64(raw),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Integer view of [`coerce_f64`], truncating toward zero.
pub fn coerce_i64(value: &Value) -> i64 {
    coerce_f64(value) as i64
}

pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(raw) => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "on" | "1"
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Render a scalar as text; numbers keep their JSON spelling, null becomes empty.
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(raw) => raw.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_i64(&value))
}

/// Integer field with a meaningful default: values that carry no number keep `fallback`.
pub(crate) fn lenient_i64_or<'de, D>(deserializer: D, fallback: i64) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(numeric_f64(&value).map_or(fallback, |number| number as i64))
}

pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_bool(&value))
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string(&value))
}

/// Course code lists: strings pass through, numbers are stringified, anything else is dropped.
pub(crate) fn lenient_code_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(code) => Some(code),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .collect())
}

/// Nested rule sections fall back to their default when the value is not a mapping
/// or does not fit the section's shape.
pub(crate) fn lenient_section<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(T::default());
    }

    Ok(serde_json::from_value(value).unwrap_or_else(|err| {
        tracing::debug!(%err, "rule section ignored");
        T::default()
    }))
}
