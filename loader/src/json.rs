//! Shape checks over the parsed JSON tree.
//!
//! Every helper takes the path of the value being inspected so fatal shape
//! errors point at the offending location, e.g. `items/Compile/metadata`.

use serde_json::{Map, Value};

use crate::error::{LoadError, Result};

/// Human-readable name of a JSON value's shape.
pub(crate) fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Joins a parent path and a key.
pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}/{key}")
    }
}

pub(crate) fn unexpected(path: &str, expected: &'static str, value: &Value) -> LoadError {
    LoadError::UnexpectedShape {
        path: path.to_string(),
        expected,
        found: shape_name(value),
    }
}

pub(crate) fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| unexpected(path, "an object", value))
}

pub(crate) fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| unexpected(path, "an array", value))
}

pub(crate) fn expect_str<'a>(value: &'a Value, path: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| unexpected(path, "a string", value))
}

pub(crate) fn expect_bool(value: &Value, path: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| unexpected(path, "a boolean", value))
}

/// A string, or `null` meaning absent.
pub(crate) fn optional_str(value: &Value, path: &str) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(unexpected(path, "a string or null", other)),
    }
}

/// A scalar rendered as text; defaults may be written as numbers or
/// booleans in the document.
pub(crate) fn scalar_text(value: &Value, path: &str) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(unexpected(path, "a scalar value", other)),
    }
}

/// A single string or an array of strings.
pub(crate) fn string_list(value: &Value, path: &str) -> Result<Vec<String>> {
    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(values) => values
            .iter()
            .enumerate()
            .map(|(i, v)| expect_str(v, &child_path(path, &i.to_string())).map(String::from))
            .collect(),
        other => Err(unexpected(path, "a string or an array of strings", other)),
    }
}

/// Keys starting with `#` are comments and carry no meaning.
pub(crate) fn is_comment_key(key: &str) -> bool {
    key.starts_with('#')
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_string_list_accepts_both_forms() {
        assert_eq!(string_list(&json!("A"), "x").unwrap(), vec!["A"]);
        assert_eq!(
            string_list(&json!(["A", "B"]), "x").unwrap(),
            vec!["A", "B"]
        );
    }

    #[test]
    fn test_string_list_reports_element_path() {
        let err = string_list(&json!(["A", 3]), "metadata/0/$appliesTo").unwrap_err();
        match err {
            LoadError::UnexpectedShape { path, found, .. } => {
                assert_eq!(path, "metadata/0/$appliesTo/1");
                assert_eq!(found, "a number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!(true), "d").unwrap().as_deref(), Some("true"));
        assert_eq!(scalar_text(&json!(4), "d").unwrap().as_deref(), Some("4"));
        assert_eq!(scalar_text(&json!(null), "d").unwrap(), None);
        assert!(scalar_text(&json!({}), "d").is_err());
    }

    #[test]
    fn test_child_path() {
        assert_eq!(child_path("", "items"), "items");
        assert_eq!(child_path("items", "Compile"), "items/Compile");
    }
}
