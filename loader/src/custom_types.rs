//! Custom-type parsing and the named custom-type registry.
//!
//! A custom type is written either as an object or as an array:
//!
//! ```json
//! {
//!   "customTypes": {
//!     "Color": {
//!       "$allow-unknown-values": true,
//!       "# palette": "comment keys are skipped",
//!       "Red": "A warm color",
//!       "Blue": null
//!     },
//!     "Size": ["Small", "Large"]
//!   }
//! }
//! ```
//!
//! In object form `$name` and `$allow-unknown-values` are directives and
//! every other key is a value mapped to its description. Array form lists
//! bare values. Types under `customTypes` are named by their key and
//! registered; inline types on a field are anonymous unless they carry a
//! `$name`, and are never registered.

use std::sync::Arc;

use build_schema_core::{
    CustomTypeInfo, CustomTypeValue, Diagnostics, NameMap, validate_custom_type_name,
};
use serde_json::Value;
use tracing::debug;

use crate::error::{LoadError, Result};
use crate::json::{
    child_path, expect_bool, expect_object, expect_str, is_comment_key, optional_str, unexpected,
};

/// Named custom types available for `@Name` references.
pub(crate) type CustomTypeRegistry = NameMap<Arc<CustomTypeInfo>>;

fn check_name(name: &str) -> Result<()> {
    validate_custom_type_name(name).map_err(|_| LoadError::InvalidCustomTypeName(name.to_string()))
}

/// Builds the registry from the top-level `customTypes` object.
pub(crate) fn build_registry(
    section: &Value,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<CustomTypeRegistry> {
    let mut registry = CustomTypeRegistry::new();

    for (name, definition) in expect_object(section, path)? {
        if is_comment_key(name) {
            continue;
        }
        check_name(name)?;
        let info = parse_custom_type(definition, Some(name.as_str()), &child_path(path, name), diags)?;
        if registry.insert(name.clone(), Arc::new(info)).is_some() {
            diags.warning(format!("custom type '{name}' is defined more than once"));
        }
    }

    debug!(count = registry.len(), "built custom type registry");
    Ok(registry)
}

/// Parses one custom-type definition.
///
/// `registered_name` is the registry key for top-level types and `None` for
/// inline types.
pub(crate) fn parse_custom_type(
    value: &Value,
    registered_name: Option<&str>,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<CustomTypeInfo> {
    let mut info = CustomTypeInfo::new(registered_name.map(String::from));

    match value {
        Value::Object(map) => {
            for (key, v) in map {
                let key_path = child_path(path, key);
                match key.as_str() {
                    "$name" => {
                        let name = expect_str(v, &key_path)?;
                        check_name(name)?;
                        match registered_name {
                            Some(registered) => diags.warning(format!(
                                "'$name' is ignored on custom type '{registered}', which is named by its key"
                            )),
                            None => info.name = Some(name.to_string()),
                        }
                    }
                    "$allow-unknown-values" => {
                        info.allow_unknown_values = expect_bool(v, &key_path)?;
                    }
                    k if is_comment_key(k) => {}
                    k if k.starts_with('$') => {
                        diags.warning(format!("unknown directive '{k}' in custom type at '{path}'"));
                    }
                    k => {
                        let mut entry = CustomTypeValue::new(k);
                        entry.description = optional_str(v, &key_path)?;
                        push_value(&mut info, entry, path, diags);
                    }
                }
            }
        }
        Value::Array(values) => {
            for (i, v) in values.iter().enumerate() {
                let text = expect_str(v, &child_path(path, &i.to_string()))?;
                push_value(&mut info, CustomTypeValue::new(text), path, diags);
            }
        }
        other => return Err(unexpected(path, "an object or an array", other)),
    }

    if info.values.is_empty() && !info.allow_unknown_values {
        diags.warning(format!("custom type at '{path}' declares no values"));
    }

    Ok(info)
}

fn push_value(info: &mut CustomTypeInfo, value: CustomTypeValue, path: &str, diags: &mut Diagnostics) {
    if info.find_value(&value.value).is_some() {
        diags.warning(format!(
            "duplicate value '{}' in custom type at '{path}'",
            value.value
        ));
        return;
    }
    info.values.push(value);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_object_form() {
        let mut diags = Diagnostics::new();
        let value = json!({
            "$allow-unknown-values": true,
            "# note": "ignored",
            "Red": "Warm",
            "Blue": null
        });
        let info = parse_custom_type(&value, Some("Color"), "customTypes/Color", &mut diags).unwrap();

        assert_eq!(info.name.as_deref(), Some("Color"));
        assert!(info.allow_unknown_values);
        assert_eq!(info.values.len(), 2);
        assert_eq!(info.values[0].value, "Red");
        assert_eq!(info.values[0].description.as_deref(), Some("Warm"));
        assert_eq!(info.values[1].description, None);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_array_form() {
        let mut diags = Diagnostics::new();
        let info = parse_custom_type(&json!(["Small", "Large"]), None, "type", &mut diags).unwrap();
        assert_eq!(info.name, None);
        let values: Vec<&str> = info.values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(values, vec!["Small", "Large"]);
    }

    #[test]
    fn test_inline_name_directive() {
        let mut diags = Diagnostics::new();
        let value = json!({ "$name": "build-mode", "Fast": "quick" });
        let info = parse_custom_type(&value, None, "type", &mut diags).unwrap();
        assert_eq!(info.name.as_deref(), Some("build-mode"));
    }

    #[test]
    fn test_invalid_inline_name_is_fatal() {
        let mut diags = Diagnostics::new();
        let value = json!({ "$name": "build--mode" });
        let err = parse_custom_type(&value, None, "type", &mut diags).unwrap_err();
        assert!(matches!(err, LoadError::InvalidCustomTypeName(n) if n == "build--mode"));
    }

    #[test]
    fn test_unknown_directive_warns() {
        let mut diags = Diagnostics::new();
        let value = json!({ "$sorted": true, "A": null });
        parse_custom_type(&value, None, "type", &mut diags).unwrap();
        assert_eq!(diags.warning_count(), 1);
    }

    #[test]
    fn test_duplicate_array_values_warn() {
        let mut diags = Diagnostics::new();
        let info = parse_custom_type(&json!(["A", "a"]), None, "type", &mut diags).unwrap();
        assert_eq!(info.values.len(), 1);
        assert_eq!(diags.warning_count(), 1);
    }

    #[test]
    fn test_scalar_definition_is_fatal() {
        let mut diags = Diagnostics::new();
        assert!(parse_custom_type(&json!("Red"), None, "type", &mut diags).is_err());
    }

    #[test]
    fn test_registry_validates_names() {
        let mut diags = Diagnostics::new();
        let ok = build_registry(&json!({ "foo-bar": ["x"] }), "customTypes", &mut diags).unwrap();
        assert!(ok.contains("FOO-BAR"));

        let err = build_registry(&json!({ "foo--bar": ["x"] }), "customTypes", &mut diags).unwrap_err();
        assert!(matches!(err, LoadError::InvalidCustomTypeName(_)));
    }
}
