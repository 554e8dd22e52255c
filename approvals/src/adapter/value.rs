//! Lookup helpers over loosely-typed JSON values.

use serde_json::Value;

use super::keys;

/// Returns true for values that count as "provided": not null and not a
/// blank string.
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Resolves a dotted path (`"user.name"`) against nested objects.
#[must_use]
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    is_present(current).then_some(current)
}

/// Returns the first present value among `paths`.
#[must_use]
pub fn first<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().find_map(|path| lookup(value, path))
}

/// Renders a string or number as trimmed text. Other kinds yield `None`.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Returns the first path among `paths` holding a string or number.
#[must_use]
pub fn first_text(value: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| lookup(value, path).and_then(scalar_text))
}

/// Joins a code and a name as `"code - name"`, or returns whichever is set.
#[must_use]
pub fn join_label(code: Option<&str>, name: Option<&str>) -> String {
    match (code, name) {
        (Some(code), Some(name)) => format!("{code} - {name}"),
        (Some(only), None) | (None, Some(only)) => only.to_owned(),
        (None, None) => String::new(),
    }
}

/// Builds a display label from either a plain string or an object carrying
/// code and name fields.
///
/// An object with only a name uses `fallback_prefix` in place of the code
/// when one is given (`"OP - Costura"`).
#[must_use]
pub fn compose_label(
    value: Option<&Value>,
    code_keys: &[&str],
    name_keys: &[&str],
    fallback_prefix: Option<&str>,
) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match value {
        Value::Object(_) => {
            let code = first_text(value, code_keys);
            let name = first_text(value, name_keys);
            match (code.as_deref(), name.as_deref(), fallback_prefix) {
                (None, Some(name), Some(prefix)) => join_label(Some(prefix), Some(name)),
                (code, name, _) => join_label(code, name),
            }
        }
        other => scalar_text(other).unwrap_or_default(),
    }
}

/// Parses a claimed percentage from a number or numeric string.
///
/// Fractional, negative, non-finite or non-numeric input yields 0.
#[must_use]
pub fn parse_percentage(value: Option<&Value>) -> u32 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => {
            // Range and integrality checked above.
            n as u32
        }
        _ => 0,
    }
}

/// Parses an explicit boolean flag from a bool, `0`/`1`, or a
/// `"true"`/`"false"`/`"1"`/`"0"` string.
#[must_use]
pub fn parse_flag(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Finds the row array inside a response envelope.
///
/// Checks, in order: the root itself; each of `envelope_keys` (directly, or
/// under a nested `data`); then the generic containers, applying the same
/// search one level down. Returns an empty slice when nothing matches.
#[must_use]
pub fn extract_array<'a>(value: &'a Value, envelope_keys: &[&str]) -> &'a [Value] {
    if let Value::Array(items) = value {
        return items;
    }
    if let Some(items) = array_under(value, envelope_keys) {
        return items;
    }
    for container in keys::CONTAINERS {
        let Some(inner) = value.get(container) else {
            continue;
        };
        if let Value::Array(items) = inner {
            return items;
        }
        if let Some(items) = array_under(inner, envelope_keys) {
            return items;
        }
    }
    &[]
}

fn array_under<'a>(value: &'a Value, envelope_keys: &[&str]) -> Option<&'a [Value]> {
    envelope_keys.iter().find_map(|key| {
        let inner = value.get(key)?;
        inner
            .as_array()
            .or_else(|| inner.get("data").and_then(Value::as_array))
            .map(Vec::as_slice)
    })
}
