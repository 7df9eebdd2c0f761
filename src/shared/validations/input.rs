//! Typed readers over a JSON object request body
//!
//! `null` and an absent key are treated alike. Every reader reports the
//! first problem it finds as a [`DomainError::Validation`].

use serde_json::{Map, Value};
use validator::ValidateRange;

use crate::shared::errors::DomainError;

/// Request body after JSON decoding
pub type JsonObject = Map<String, Value>;

type InputResult<T> = Result<T, DomainError>;

/// Value under `key`, with `null` folded into `None`.
pub fn present<'a>(body: &'a JsonObject, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}

/// Whether any of `keys` carries a value.
pub fn has_any(body: &JsonObject, keys: &[&str]) -> bool {
    keys.iter().any(|key| present(body, key).is_some())
}

/// `{label} is missing from input` / `{label} must be a string`
pub fn required_str<'a>(body: &'a JsonObject, key: &str, label: &str) -> InputResult<&'a str> {
    match present(body, key) {
        None => Err(DomainError::validation(format!(
            "{label} is missing from input"
        ))),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(DomainError::validation(format!("{label} must be a string"))),
    }
}

pub fn optional_str<'a>(
    body: &'a JsonObject,
    key: &str,
    label: &str,
) -> InputResult<Option<&'a str>> {
    match present(body, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(DomainError::validation(format!("{label} must be a string"))),
    }
}

pub fn optional_bool(body: &JsonObject, key: &str, label: &str) -> InputResult<Option<bool>> {
    match present(body, key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(DomainError::validation(format!("{label} must be a boolean"))),
    }
}

/// Optional integer within `[min, max]`.
///
/// Messages: `{label} must be a number`, `{label} must be an integer`,
/// `{label} must be between {min} - {max}`.
pub fn optional_integer(
    body: &JsonObject,
    key: &str,
    label: &str,
    min: i64,
    max: i64,
) -> InputResult<Option<i64>> {
    let Some(value) = present(body, key) else {
        return Ok(None);
    };
    let Value::Number(number) = value else {
        return Err(DomainError::validation(format!("{label} must be a number")));
    };

    let integer = match number.as_i64() {
        Some(i) => i,
        None => match number.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
            Some(f) if f.fract() == 0.0 => {
                return Err(DomainError::validation(format!(
                    "{label} must be between {min} - {max}"
                )))
            }
            _ => {
                return Err(DomainError::validation(format!(
                    "{label} must be an integer"
                )))
            }
        },
    };

    if !integer.validate_range(Some(min), Some(max), None, None) {
        return Err(DomainError::validation(format!(
            "{label} must be between {min} - {max}"
        )));
    }
    Ok(Some(integer))
}

/// Destructive operations confirmed with a literal `true`.
pub fn confirm_true(body: &JsonObject) -> InputResult<()> {
    match present(body, "confirm") {
        None => Err(DomainError::validation("confirm is missing from input")),
        Some(Value::Bool(true)) => Ok(()),
        Some(Value::Bool(false)) => Err(DomainError::validation(
            "confirm must be set to true to remove this record",
        )),
        Some(_) => Err(DomainError::validation("confirm must be a boolean")),
    }
}

/// Destructive operations confirmed by repeating a field value.
///
/// On mismatch: `confirm input must match {field}: {expected}`.
pub fn confirm_matches(body: &JsonObject, field: &str, expected: &str) -> InputResult<()> {
    let confirm = required_str(body, "confirm", "confirm")?;
    if confirm != expected {
        return Err(DomainError::validation(format!(
            "confirm input must match {field}: {expected}"
        )));
    }
    Ok(())
}
