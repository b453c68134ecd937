//! Entity builders: one JSON value in, one schema entity out.
//!
//! Properties and metadata accept a bare string as shorthand for "description
//! only, unknown kind". Items must be objects. Targets accept a string or an
//! object with a description.
//!
//! Recognized field keys:
//!
//! | key                  | property | item | metadata |
//! |----------------------|----------|------|----------|
//! | `description`        | x        | x    | x        |
//! | `type`               | x        | x    | x        |
//! | `values`             | x        | x    | x        |
//! | `listSeparators`     | x        |      | x        |
//! | `defaultValue`       | x        |      | x        |
//! | `deprecated`         | x        | x    | x        |
//! | `deprecationMessage` | x        | x    | x        |
//! | `required`           |          |      | x        |
//! | `includeDescription` |          | x    |          |
//! | `metadata`           |          | x    |          |

use std::sync::Arc;

use build_schema_core::{
    CustomTypeInfo, Deprecation, Diagnostics, ItemInfo, KindModifiers, MetadataInfo,
    PropertyInfo, TargetInfo, ValueKind,
};
use serde_json::{Map, Value};

use crate::custom_types::{CustomTypeRegistry, parse_custom_type};
use crate::error::Result;
use crate::json::{
    child_path, expect_bool, expect_object, expect_str, is_comment_key, optional_str,
    scalar_text, unexpected,
};
use crate::value_kind::resolve_kind;

/// Which entity a field declaration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldContext {
    Property,
    Item,
    Metadata,
}

impl FieldContext {
    fn label(self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Item => "item",
            Self::Metadata => "metadata",
        }
    }
}

/// Fields shared by properties, items and metadata.
#[derive(Debug, Default)]
struct FieldDecl<'a> {
    description: Option<String>,
    kind: ValueKind,
    custom_type: Option<Arc<CustomTypeInfo>>,
    default_value: Option<String>,
    deprecation: Deprecation,
    required: bool,
    include_description: Option<String>,
    metadata: Option<&'a Value>,
}

fn parse_field<'a>(
    name: &str,
    map: &'a Map<String, Value>,
    context: FieldContext,
    path: &str,
    registry: &CustomTypeRegistry,
    diags: &mut Diagnostics,
) -> Result<FieldDecl<'a>> {
    let mut decl = FieldDecl::default();
    let mut separators: Option<&str> = None;
    let mut inline: Option<CustomTypeInfo> = None;
    let mut deprecated: Option<bool> = None;
    let mut deprecation_message: Option<String> = None;

    for (key, value) in map {
        let key_path = child_path(path, key);
        if is_comment_key(key) {
            continue;
        }
        match key.as_str() {
            "description" => decl.description = optional_str(value, &key_path)?,
            "type" => match value {
                Value::String(token) => {
                    let resolved = resolve_kind(token, registry, &key_path, diags);
                    decl.kind = resolved.kind;
                    decl.custom_type = resolved.custom_type;
                }
                Value::Object(_) | Value::Array(_) => {
                    set_inline(&mut inline, value, &key_path, diags)?;
                }
                other => return Err(unexpected(&key_path, "a string, an object or an array", other)),
            },
            "values" => set_inline(&mut inline, value, &key_path, diags)?,
            "deprecated" => deprecated = Some(expect_bool(value, &key_path)?),
            "deprecationMessage" => deprecation_message = optional_str(value, &key_path)?,
            "listSeparators" if context != FieldContext::Item => {
                separators = Some(expect_str(value, &key_path)?);
            }
            "defaultValue" if context != FieldContext::Item => {
                decl.default_value = scalar_text(value, &key_path)?;
            }
            "required" if context == FieldContext::Metadata => {
                decl.required = expect_bool(value, &key_path)?;
            }
            "includeDescription" if context == FieldContext::Item => {
                decl.include_description = optional_str(value, &key_path)?;
            }
            "metadata" if context == FieldContext::Item => decl.metadata = Some(value),
            _ => diags.warning(format!(
                "unknown key '{key}' in {} '{name}'",
                context.label()
            )),
        }
    }

    if let Some(separators) = separators {
        decl.kind = decl.kind.with(KindModifiers::from_separators(separators));
    }

    if let Some(inline) = inline {
        if decl.kind.is_custom_type() {
            diags.warning(format!(
                "inline values on {} '{name}' are ignored because it references a named custom type",
                context.label()
            ));
        } else {
            if decl.kind.is_unknown() && !inline.values.is_empty() {
                decl.kind = ValueKind::custom_type().with(decl.kind.modifiers);
            }
            decl.custom_type = Some(Arc::new(inline));
        }
    }

    let is_deprecated = deprecated.unwrap_or(deprecation_message.is_some());
    if is_deprecated {
        decl.deprecation = Deprecation::deprecated(deprecation_message);
    } else if deprecation_message.is_some() {
        diags.warning(format!(
            "{} '{name}' has a deprecation message but is not deprecated",
            context.label()
        ));
    }

    Ok(decl)
}

fn set_inline(
    slot: &mut Option<CustomTypeInfo>,
    value: &Value,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<()> {
    let info = parse_custom_type(value, None, path, diags)?;
    if slot.replace(info).is_some() {
        diags.warning(format!(
            "custom type at '{path}' replaces an inline custom type declared earlier"
        ));
    }
    Ok(())
}

/// Builds a property from a string shorthand or an object.
pub(crate) fn build_property(
    name: &str,
    value: &Value,
    path: &str,
    registry: &CustomTypeRegistry,
    diags: &mut Diagnostics,
) -> Result<PropertyInfo> {
    let mut info = PropertyInfo::new(name);
    match value {
        Value::String(desc) => info.description = Some(desc.clone()),
        Value::Object(map) => {
            let decl = parse_field(name, map, FieldContext::Property, path, registry, diags)?;
            info.description = decl.description;
            info.kind = decl.kind;
            info.custom_type = decl.custom_type;
            info.default_value = decl.default_value;
            info.deprecation = decl.deprecation;
        }
        other => return Err(unexpected(path, "a string or an object", other)),
    }
    Ok(info)
}

/// Builds an item and the metadata declared inside it.
///
/// Items cannot take their values from a custom type; such a declaration is
/// reported as an error and the item is kept with the kind it resolved to.
pub(crate) fn build_item(
    name: &str,
    value: &Value,
    path: &str,
    registry: &CustomTypeRegistry,
    diags: &mut Diagnostics,
) -> Result<ItemInfo> {
    let map = expect_object(value, path)?;
    let decl = parse_field(name, map, FieldContext::Item, path, registry, diags)?;

    if decl.kind.is_custom_type() {
        diags.error(format!("custom type not permitted for items (item '{name}')"));
    }

    let mut info = ItemInfo::new(name);
    info.description = decl.description;
    info.include_description = decl.include_description;
    info.kind = decl.kind;
    info.custom_type = decl.custom_type;
    info.deprecation = decl.deprecation;

    if let Some(metadata) = decl.metadata {
        let metadata_path = child_path(path, "metadata");
        for (meta_name, meta_value) in expect_object(metadata, &metadata_path)? {
            if is_comment_key(meta_name) {
                continue;
            }
            let meta_path = child_path(&metadata_path, meta_name);
            let meta = build_metadata(meta_name, name, meta_value, &meta_path, registry, diags)?;
            if info.find_metadata(meta_name).is_some() {
                diags.warning(format!(
                    "metadata '{meta_name}' on item '{name}' is defined more than once"
                ));
            }
            info.add_metadata(meta);
        }
    }

    Ok(info)
}

/// Builds a metadata declaration owned by `item`.
pub(crate) fn build_metadata(
    name: &str,
    item: &str,
    value: &Value,
    path: &str,
    registry: &CustomTypeRegistry,
    diags: &mut Diagnostics,
) -> Result<MetadataInfo> {
    let mut info = MetadataInfo::new(name, item);
    match value {
        Value::String(desc) => info.description = Some(desc.clone()),
        Value::Object(map) => {
            let decl = parse_field(name, map, FieldContext::Metadata, path, registry, diags)?;
            info.description = decl.description;
            info.required = decl.required;
            info.kind = decl.kind;
            info.custom_type = decl.custom_type;
            info.default_value = decl.default_value;
            info.deprecation = decl.deprecation;
        }
        other => return Err(unexpected(path, "a string or an object", other)),
    }
    Ok(info)
}

/// Builds a target from a string shorthand or an object.
pub(crate) fn build_target(
    name: &str,
    value: &Value,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<TargetInfo> {
    let mut info = TargetInfo::new(name);
    match value {
        Value::String(desc) => info.description = Some(desc.clone()),
        Value::Object(map) => {
            for (key, v) in map {
                match key.as_str() {
                    "description" => {
                        info.description = optional_str(v, &child_path(path, key))?;
                    }
                    k if is_comment_key(k) => {}
                    k => diags.warning(format!("unknown key '{k}' in target '{name}'")),
                }
            }
        }
        other => return Err(unexpected(path, "a string or an object", other)),
    }
    Ok(info)
}
