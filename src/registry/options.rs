//! Option decoding shared by predicates and transforms.
//!
//! Options arrive as loose JSON in the shape the `validator` package accepts:
//! an object of named settings, or a single positional value.

use serde_json::Value;

/// A capability was handed options it cannot interpret.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BadOptions(pub String);

pub(crate) type OptionResult<T> = Result<T, BadOptions>;

/// Look up a named setting, treating `null` as absent.
pub(crate) fn setting<'a>(options: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    options
        .and_then(Value::as_object)
        .and_then(|obj| obj.get(key))
        .filter(|v| !v.is_null())
}

/// Read a numeric setting; numeric strings are accepted.
pub(crate) fn number_setting(options: Option<&Value>, key: &str) -> OptionResult<Option<f64>> {
    match setting(options, key) {
        None => Ok(None),
        Some(value) => as_number(value)
            .map(Some)
            .ok_or_else(|| BadOptions(format!("{} must be a number", key))),
    }
}

/// Read a boolean setting.
pub(crate) fn bool_setting(options: Option<&Value>, key: &str) -> OptionResult<Option<bool>> {
    match setting(options, key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(BadOptions(format!("{} must be a boolean", key))),
    }
}

/// Coerce a JSON value to a number the way loose numeric options are read.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Render a positional option as text.
///
/// Missing and `null` options render as the empty string; objects and arrays
/// render as their JSON text.
pub(crate) fn as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Positional boolean flag, e.g. `toBoolean`'s `strict`. Any truthy value
/// switches it on.
pub(crate) fn flag(value: Option<&Value>) -> bool {
    value.map_or(false, is_truthy)
}

/// JavaScript-style truthiness of a capability result.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
