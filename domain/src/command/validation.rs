//! Input validation against a [`CommandSignature`].
//!
//! Absent fields, `null`, and the [`NOT_FOUND`] sentinel are all "no value".
//! A no-value field passes validation when it is optional; a present value
//! must satisfy the field's [`FieldConstraint`].

use super::entities::{CommandSignature, FieldConstraint, FieldSpec};
use super::value_objects::{CommandError, NOT_FOUND};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

/// Compiled field patterns, keyed by their source.
static PATTERNS: LazyLock<Mutex<HashMap<&'static str, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Compile `pattern` once and reuse it afterwards.
fn compiled(pattern: &'static str) -> Result<Regex, regex::Error> {
    let mut cache = PATTERNS.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    cache.insert(pattern, re.clone());
    Ok(re)
}

/// Validate `params` against every declared input of `signature`.
///
/// Undeclared keys are ignored.
pub fn validate(signature: &CommandSignature, params: &Value) -> Result<(), CommandError> {
    let empty = Map::new();
    let object = match params {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            return Err(CommandError::InvalidParameters(format!(
                "expected an object, got {other}"
            )));
        }
    };
    for field in &signature.inputs {
        match present(object.get(field.name)) {
            None if field.optional => {}
            None => return Err(CommandError::MissingParameter(field.name.to_string())),
            Some(value) => check_constraint(field, value)?,
        }
    }
    Ok(())
}

/// Map the no-value forms to `None`.
fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s == NOT_FOUND => None,
        Some(v) => Some(v),
    }
}

fn check_constraint(field: &FieldSpec, value: &Value) -> Result<(), CommandError> {
    match &field.constraint {
        FieldConstraint::Pattern { regex } => {
            let text = value
                .as_str()
                .ok_or_else(|| CommandError::validation(field.name, "expected a string"))?;
            let re = compiled(*regex).map_err(|e| {
                CommandError::validation(field.name, format!("bad pattern {regex}: {e}"))
            })?;
            if !re.is_match(text) {
                return Err(CommandError::validation(
                    field.name,
                    format!("'{text}' does not match {regex}"),
                ));
            }
        }
        FieldConstraint::Range { min, max } => {
            let number = value
                .as_f64()
                .ok_or_else(|| CommandError::validation(field.name, "expected a number"))?;
            if number < *min || number > *max {
                return Err(CommandError::validation(
                    field.name,
                    format!("{number} is not between {min} and {max}"),
                ));
            }
        }
        FieldConstraint::OneOf { values } => {
            let text = value
                .as_str()
                .ok_or_else(|| CommandError::validation(field.name, "expected a string"))?;
            if !values.contains(&text) {
                return Err(CommandError::validation(
                    field.name,
                    format!("'{text}' is not one of {}", values.join(", ")),
                ));
            }
        }
        FieldConstraint::Free => {}
    }
    Ok(())
}

/// Value of `name`, with the no-value forms mapped to `None`.
pub fn field_value<'a>(params: &'a Value, name: &str) -> Option<&'a Value> {
    present(params.get(name))
}

/// String value of `name`, if present.
pub fn optional_str(params: &Value, name: &str) -> Option<String> {
    field_value(params, name)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Value of `name`, or [`CommandError::MissingParameter`].
pub fn require<'a>(params: &'a Value, name: &str) -> Result<&'a Value, CommandError> {
    field_value(params, name).ok_or_else(|| CommandError::MissingParameter(name.to_string()))
}
