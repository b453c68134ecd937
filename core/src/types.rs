//! Schema entity definitions.
//!
//! This module defines the entities a build schema declares: properties,
//! items with their metadata, tasks, targets, and custom types. All of them
//! implement [`BaseInfo`], the capability set consumed by completion, hover
//! and validation engines.
//!
//! Entities are built once while loading and are read-only afterwards.

use std::sync::Arc;

use serde::Serialize;

use crate::{NameMap, ValueKind};

/// Common capabilities of every schema entity.
pub trait BaseInfo {
    fn name(&self) -> &str;

    fn description(&self) -> Option<&str>;

    /// Whether the entity is internal to the schema that defines it.
    ///
    /// Built-in schemas may hide internal symbols; schemas loaded from JSON
    /// are always public.
    fn is_private(&self) -> bool {
        false
    }
}

/// One permitted value of a custom type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomTypeValue {
    pub value: String,
    pub description: Option<String>,
}

impl CustomTypeValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }
}

impl BaseInfo for CustomTypeValue {
    fn name(&self) -> &str {
        &self.value
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A user-defined enumeration of literal values.
///
/// Custom types declared at the top of a schema are named and shared (via
/// [`Arc`]) by every field that references them. Custom types declared
/// inline on a field are usually anonymous and owned by that field alone.
///
/// # Examples
///
/// ```
/// use build_schema_core::{CustomTypeInfo, CustomTypeValue};
///
/// let color = CustomTypeInfo::new(Some("Color".into()))
///     .with_value(CustomTypeValue::new("Red").with_description("Warm"))
///     .with_value(CustomTypeValue::new("Blue"));
///
/// assert!(color.find_value("red").is_some());
/// assert!(color.find_value("Green").is_none());
/// assert!(!color.allow_unknown_values);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomTypeInfo {
    pub name: Option<String>,
    pub values: Vec<CustomTypeValue>,
    /// Whether values outside [`values`](Self::values) are accepted.
    pub allow_unknown_values: bool,
}

impl CustomTypeInfo {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            values: Vec::new(),
            allow_unknown_values: false,
        }
    }

    pub fn with_value(mut self, value: CustomTypeValue) -> Self {
        self.values.push(value);
        self
    }

    /// Finds a value by text, ignoring ASCII case.
    pub fn find_value(&self, value: &str) -> Option<&CustomTypeValue> {
        self.values
            .iter()
            .find(|v| v.value.eq_ignore_ascii_case(value))
    }
}

/// Deprecation state shared by properties, items and metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Deprecation {
    pub is_deprecated: bool,
    pub message: Option<String>,
}

impl Deprecation {
    pub fn deprecated(message: Option<String>) -> Self {
        Self {
            is_deprecated: true,
            message,
        }
    }
}

/// A named property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyInfo {
    pub name: String,
    pub description: Option<String>,
    pub kind: ValueKind,
    /// Resolved custom type when [`kind`](Self::kind) is a custom-type kind.
    pub custom_type: Option<Arc<CustomTypeInfo>>,
    pub default_value: Option<String>,
    #[serde(flatten)]
    pub deprecation: Deprecation,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: ValueKind::UNKNOWN,
            custom_type: None,
            default_value: None,
            deprecation: Deprecation::default(),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }
}

impl BaseInfo for PropertyInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A metadata field attached to an item.
///
/// Every instance has exactly one owning item, recorded by name in
/// [`item`](Self::item). When one declaration applies to several items, each
/// item holds its own instance (see [`copy_for_item`](Self::copy_for_item)).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataInfo {
    pub name: String,
    pub description: Option<String>,
    /// Well-known metadata provided by the build engine itself.
    pub reserved: bool,
    pub required: bool,
    pub kind: ValueKind,
    /// Name of the owning item.
    pub item: String,
    pub custom_type: Option<Arc<CustomTypeInfo>>,
    pub default_value: Option<String>,
    #[serde(flatten)]
    pub deprecation: Deprecation,
}

impl MetadataInfo {
    pub fn new(name: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            reserved: false,
            required: false,
            kind: ValueKind::UNKNOWN,
            item: item.into(),
            custom_type: None,
            default_value: None,
            deprecation: Deprecation::default(),
        }
    }

    /// Builds an independent instance of this declaration owned by `item`.
    ///
    /// Name, description, reserved and required flags, kind, custom type and
    /// default value are carried over. Deprecation is not: only the first
    /// owner of a shared declaration reports it.
    ///
    /// # Examples
    ///
    /// ```
    /// use build_schema_core::{Deprecation, MetadataInfo};
    ///
    /// let mut original = MetadataInfo::new("Pack", "None");
    /// original.required = true;
    /// original.deprecation = Deprecation::deprecated(Some("use PackagePath".into()));
    ///
    /// let copy = original.copy_for_item("Content");
    /// assert_eq!(copy.item, "Content");
    /// assert!(copy.required);
    /// assert!(!copy.deprecation.is_deprecated);
    /// ```
    pub fn copy_for_item(&self, item: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            reserved: self.reserved,
            required: self.required,
            kind: self.kind,
            item: item.into(),
            custom_type: self.custom_type.clone(),
            default_value: self.default_value.clone(),
            deprecation: Deprecation::default(),
        }
    }
}

impl BaseInfo for MetadataInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A named item type and the metadata its items may carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemInfo {
    pub name: String,
    pub description: Option<String>,
    /// Describes what the `Include` attribute of this item holds.
    pub include_description: Option<String>,
    pub kind: ValueKind,
    pub custom_type: Option<Arc<CustomTypeInfo>>,
    #[serde(flatten)]
    pub deprecation: Deprecation,
    pub metadata: NameMap<MetadataInfo>,
}

impl ItemInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            include_description: None,
            kind: ValueKind::UNKNOWN,
            custom_type: None,
            deprecation: Deprecation::default(),
            metadata: NameMap::new(),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Attaches metadata, replacing any declaration with the same name.
    pub fn add_metadata(&mut self, metadata: MetadataInfo) {
        self.metadata.insert(metadata.name.clone(), metadata);
    }

    pub fn find_metadata(&self, name: &str) -> Option<&MetadataInfo> {
        self.metadata.get(name)
    }
}

impl BaseInfo for ItemInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A named task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskInfo {
    pub name: String,
    pub description: Option<String>,
}

impl TaskInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }
}

impl BaseInfo for TaskInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A named target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetInfo {
    pub name: String,
    pub description: Option<String>,
}

impl TargetInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }
}

impl BaseInfo for TargetInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
