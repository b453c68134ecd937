//! Schema document loading.
//!
//! [`SchemaLoader`] turns one JSON schema document into a [`SchemaModel`]
//! plus [`Diagnostics`]. The root object is scanned once to classify its
//! sections; the sections are then processed in a fixed order, whatever
//! their order in the document:
//!
//! 1. `intellisenseImports`
//! 2. `customTypes`
//! 3. `properties`
//! 4. `items`
//! 5. `metadata` (metadata groups)
//! 6. `targets`
//!
//! Custom types therefore exist before any field references them, and items
//! exist before metadata groups are applied to them.
//!
//! # Loading patterns
//!
//! ```
//! use build_schema_loader::SchemaLoader;
//!
//! let outcome = SchemaLoader::load_str(r#"{
//!     "items": { "Widget": { "metadata": { "Tint": { "type": "@Color" } } } },
//!     "customTypes": { "Color": ["Red", "Blue"] }
//! }"#).unwrap();
//!
//! let tint = outcome.model.get_item("widget").unwrap().find_metadata("tint").unwrap();
//! assert!(tint.custom_type.is_some());
//! assert!(outcome.diagnostics.is_empty());
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use build_schema_core::{Diagnostics, SchemaModel};
use serde_json::Value;
use tracing::{debug, info};

use crate::builders::{build_item, build_property, build_target};
use crate::custom_types::{CustomTypeRegistry, build_registry};
use crate::error::{LoadError, Result};
use crate::groups::apply_metadata_groups;
use crate::json::{child_path, expect_array, expect_object, expect_str, is_comment_key, shape_name};
use crate::resources::EmbeddedResources;

const IMPORTS: &str = "intellisenseImports";
const CUSTOM_TYPES: &str = "customTypes";
const PROPERTIES: &str = "properties";
const ITEMS: &str = "items";
const METADATA: &str = "metadata";
const TARGETS: &str = "targets";

/// A successfully loaded schema: the model and everything worth reporting
/// about how it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub model: SchemaModel,
    pub diagnostics: Diagnostics,
}

/// Top-level sections found by the classification scan.
#[derive(Debug, Default)]
struct Sections<'a> {
    imports: Option<&'a Value>,
    custom_types: Option<&'a Value>,
    properties: Option<&'a Value>,
    items: Option<&'a Value>,
    metadata: Option<&'a Value>,
    targets: Option<&'a Value>,
}

impl<'a> Sections<'a> {
    fn classify(root: &'a serde_json::Map<String, Value>, diags: &mut Diagnostics) -> Self {
        let mut sections = Self::default();
        for (key, value) in root {
            match key.as_str() {
                IMPORTS => sections.imports = Some(value),
                CUSTOM_TYPES => sections.custom_types = Some(value),
                PROPERTIES => sections.properties = Some(value),
                ITEMS => sections.items = Some(value),
                METADATA => sections.metadata = Some(value),
                TARGETS => sections.targets = Some(value),
                "license" | "$schema" => {}
                other => diags.warning(format!("unknown top-level key '{other}'")),
            }
        }
        sections
    }
}

/// Entry points for loading schema documents.
///
/// Every entry point returns a [`LoadOutcome`] for documents that can be
/// resolved, even when diagnostics were recorded. Only structurally broken
/// documents (see [`LoadError`]) fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaLoader;

impl SchemaLoader {
    /// Loads a schema from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::JsonError`] for malformed JSON and the errors of
    /// [`load_value`](Self::load_value) for malformed schemas.
    pub fn load_str(text: &str) -> Result<LoadOutcome> {
        let root: Value = serde_json::from_str(text)?;
        Self::load_value(&root)
    }

    /// Loads a schema from a reader.
    ///
    /// # Errors
    ///
    /// Same as [`load_str`](Self::load_str); read failures surface as
    /// [`LoadError::JsonError`].
    pub fn load_reader(reader: impl Read) -> Result<LoadOutcome> {
        let root: Value = serde_json::from_reader(reader)?;
        Self::load_value(&root)
    }

    /// Loads a schema file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::IoError`] if the file cannot be opened, otherwise
    /// the errors of [`load_reader`](Self::load_reader).
    pub fn load_path(path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading schema file");
        let file = File::open(path)?;
        Self::load_reader(BufReader::new(file))
    }

    /// Loads a schema registered in `resources` under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ResourceNotFound`] if `id` is not registered,
    /// otherwise the errors of [`load_str`](Self::load_str).
    pub fn load_embedded(resources: &EmbeddedResources, id: &str) -> Result<LoadOutcome> {
        let text = resources.get(id)?;
        debug!(id, "loading embedded schema");
        Self::load_str(text)
    }

    /// Resolves an already-parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotAnObject`] if the root is not an object,
    /// [`LoadError::InvalidCustomTypeName`] for malformed custom-type names,
    /// and [`LoadError::UnexpectedShape`] when a value has the wrong JSON
    /// shape for its position.
    pub fn load_value(root: &Value) -> Result<LoadOutcome> {
        let root = root
            .as_object()
            .ok_or_else(|| LoadError::NotAnObject(shape_name(root)))?;

        let mut diagnostics = Diagnostics::new();
        let mut model = SchemaModel::new();
        let sections = Sections::classify(root, &mut diagnostics);

        if let Some(imports) = sections.imports {
            load_imports(imports, &mut model)?;
        }

        let registry = match sections.custom_types {
            Some(custom_types) => build_registry(custom_types, CUSTOM_TYPES, &mut diagnostics)?,
            None => CustomTypeRegistry::new(),
        };

        if let Some(properties) = sections.properties {
            load_properties(properties, &mut model, &registry, &mut diagnostics)?;
        }

        if let Some(items) = sections.items {
            load_items(items, &mut model, &registry, &mut diagnostics)?;
        }

        if let Some(groups) = sections.metadata {
            debug!("applying metadata groups");
            apply_metadata_groups(groups, METADATA, &mut model, &registry, &mut diagnostics)?;
        }

        if let Some(targets) = sections.targets {
            load_targets(targets, &mut model, &mut diagnostics)?;
        }

        info!(
            properties = model.properties.len(),
            items = model.items.len(),
            targets = model.targets.len(),
            custom_types = registry.len(),
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            "loaded schema"
        );

        Ok(LoadOutcome { model, diagnostics })
    }
}

fn load_imports(section: &Value, model: &mut SchemaModel) -> Result<()> {
    let imports = expect_array(section, IMPORTS)?;
    debug!(count = imports.len(), "loading imports");
    for (i, import) in imports.iter().enumerate() {
        let id = expect_str(import, &child_path(IMPORTS, &i.to_string()))?;
        model.imports.push(id.to_string());
    }
    Ok(())
}

fn load_properties(
    section: &Value,
    model: &mut SchemaModel,
    registry: &CustomTypeRegistry,
    diags: &mut Diagnostics,
) -> Result<()> {
    let properties = expect_object(section, PROPERTIES)?;
    debug!(count = properties.len(), "loading properties");
    for (name, value) in properties {
        if is_comment_key(name) {
            continue;
        }
        let info = build_property(name, value, &child_path(PROPERTIES, name), registry, diags)?;
        if model.properties.contains(name) {
            diags.warning(format!("property '{name}' is defined more than once"));
        }
        model.add(info);
    }
    Ok(())
}

fn load_items(
    section: &Value,
    model: &mut SchemaModel,
    registry: &CustomTypeRegistry,
    diags: &mut Diagnostics,
) -> Result<()> {
    let items = expect_object(section, ITEMS)?;
    debug!(count = items.len(), "loading items");
    for (name, value) in items {
        if is_comment_key(name) {
            continue;
        }
        let info = build_item(name, value, &child_path(ITEMS, name), registry, diags)?;
        if model.items.contains(name) {
            diags.warning(format!("item '{name}' is defined more than once"));
        }
        model.add(info);
    }
    Ok(())
}

fn load_targets(section: &Value, model: &mut SchemaModel, diags: &mut Diagnostics) -> Result<()> {
    let targets = expect_object(section, TARGETS)?;
    debug!(count = targets.len(), "loading targets");
    for (name, value) in targets {
        if is_comment_key(name) {
            continue;
        }
        let info = build_target(name, value, &child_path(TARGETS, name), diags)?;
        if model.targets.contains(name) {
            diags.warning(format!("target '{name}' is defined more than once"));
        }
        model.add(info);
    }
    Ok(())
}
