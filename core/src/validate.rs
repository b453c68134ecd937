//! Name rules and model validation.
//!
//! [`validate_custom_type_name`] enforces the naming rule for custom types.
//! [`validate_model`] checks structural invariants of a model, which is
//! mostly useful after several fragments have been composed with
//! [`merge_models`](crate::merge_models) or built by hand.
//!
//! # Examples
//!
//! ```
//! use build_schema_core::*;
//!
//! assert!(validate_custom_type_name("target-os").is_ok());
//! assert!(validate_custom_type_name("target--os").is_err());
//!
//! let mut item = ItemInfo::new("Compile");
//! item.add_metadata(MetadataInfo::new("Link", "Content"));
//! let mut model = SchemaModel::new();
//! model.add(item);
//! assert!(!validate_model(&model).is_empty());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{BaseInfo, NameMap, SchemaModel, ValueKind};

static CUSTOM_TYPE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]+(-[A-Za-z0-9]+)*$").expect("static regex must compile")
});

/// Structural problems found in a schema model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Custom-type name is not dash-separated alphanumeric segments.
    #[error("invalid custom type name: '{0}'")]
    InvalidCustomTypeName(String),
    /// A metadata instance names a different owner than the item holding it.
    #[error("metadata '{metadata}' on item '{item}' is owned by '{owner}'")]
    MetadataOwnerMismatch {
        item: String,
        metadata: String,
        owner: String,
    },
    /// A field has a custom-type kind but no resolved custom type.
    #[error("'{0}' has a custom type kind but no resolved custom type")]
    UnresolvedCustomType(String),
    /// A map entry is stored under a name that differs from the entity name.
    #[error("entity '{name}' is stored under key '{key}'")]
    KeyMismatch { key: String, name: String },
}

/// Checks a custom-type name: one or more ASCII alphanumeric segments
/// separated by single dashes.
///
/// # Examples
///
/// ```
/// use build_schema_core::validate_custom_type_name;
///
/// assert!(validate_custom_type_name("Color").is_ok());
/// assert!(validate_custom_type_name("foo-bar").is_ok());
/// assert!(validate_custom_type_name("-foo").is_err());
/// assert!(validate_custom_type_name("foo-").is_err());
/// assert!(validate_custom_type_name("foo bar").is_err());
/// ```
pub fn validate_custom_type_name(name: &str) -> Result<(), ValidationError> {
    if CUSTOM_TYPE_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCustomTypeName(name.to_string()))
    }
}

/// Validates a schema model.
///
/// Checks that map keys match entity names, that every metadata instance is
/// owned by the item that holds it, and that custom-type kinds carry a
/// resolved custom type.
pub fn validate_model(model: &SchemaModel) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_keys(&model.properties, &mut errors);
    check_keys(&model.items, &mut errors);
    check_keys(&model.tasks, &mut errors);
    check_keys(&model.targets, &mut errors);

    for prop in model.properties.values() {
        check_custom_type(&prop.name, prop.kind, prop.custom_type.is_some(), &mut errors);
    }

    for item in model.items.values() {
        check_keys(&item.metadata, &mut errors);
        for meta in item.metadata.values() {
            if !meta.item.eq_ignore_ascii_case(&item.name) {
                errors.push(ValidationError::MetadataOwnerMismatch {
                    item: item.name.clone(),
                    metadata: meta.name.clone(),
                    owner: meta.item.clone(),
                });
            }
            let path = format!("{}.{}", item.name, meta.name);
            check_custom_type(&path, meta.kind, meta.custom_type.is_some(), &mut errors);
        }
    }

    errors
}

fn check_keys<V: BaseInfo>(map: &NameMap<V>, errors: &mut Vec<ValidationError>) {
    for (key, entity) in map.iter() {
        if !key.eq_ignore_ascii_case(entity.name()) {
            errors.push(ValidationError::KeyMismatch {
                key: key.to_string(),
                name: entity.name().to_string(),
            });
        }
    }
}

fn check_custom_type(
    path: &str,
    kind: ValueKind,
    resolved: bool,
    errors: &mut Vec<ValidationError>,
) {
    if kind.is_custom_type() && !resolved {
        errors.push(ValidationError::UnresolvedCustomType(path.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{CustomTypeInfo, ItemInfo, MetadataInfo, PropertyInfo};

    #[test]
    fn test_custom_type_names() {
        for ok in ["a", "A1", "foo-bar", "x-1-y"] {
            assert!(validate_custom_type_name(ok).is_ok(), "{ok}");
        }
        for bad in ["", "foo--bar", "-a", "a-", "a_b", "a.b", "@a"] {
            assert!(validate_custom_type_name(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_valid_model_has_no_errors() {
        let mut model = SchemaModel::new();
        let mut item = ItemInfo::new("Compile");
        let mut meta = MetadataInfo::new("SubType", "compile");
        meta.kind = ValueKind::custom_type();
        meta.custom_type = Some(Arc::new(CustomTypeInfo::new(None)));
        item.add_metadata(meta);
        model.add(item);
        model.add(PropertyInfo::new("Configuration"));

        assert!(validate_model(&model).is_empty());
    }

    #[test]
    fn test_unresolved_custom_type_is_reported() {
        let mut model = SchemaModel::new();
        model.add(PropertyInfo::new("Tint").with_kind(ValueKind::custom_type()));

        let errors = validate_model(&model);
        assert_eq!(
            errors,
            vec![ValidationError::UnresolvedCustomType("Tint".into())]
        );
    }

    #[test]
    fn test_key_mismatch_is_reported() {
        let mut model = SchemaModel::new();
        model
            .properties
            .insert("Alias", PropertyInfo::new("Real"));

        let errors = validate_model(&model);
        assert!(matches!(errors[0], ValidationError::KeyMismatch { .. }));
    }
}
