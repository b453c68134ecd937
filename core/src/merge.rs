//! Model composition with configurable conflict resolution.
//!
//! Tooling usually layers several schema fragments (SDK schemas, package
//! schemas, project-local schemas) into one model. [`merge_models`]
//! combines two fragments using a [`MergeStrategy`] to resolve entities that
//! both fragments declare.
//!
//! # Example
//!
//! ```
//! use build_schema_core::*;
//!
//! let mut base = SchemaModel::new();
//! base.add(PropertyInfo::new("Configuration"));
//!
//! let mut overlay = SchemaModel::new();
//! overlay.add(PropertyInfo::new("Platform"));
//!
//! let merged = merge_models(&base, &overlay, MergeStrategy::Union);
//! assert_eq!(merged.properties.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::{ItemInfo, NameMap, SchemaModel};

/// Model merge behavior.
///
/// # Examples
///
/// ```
/// use build_schema_core::*;
///
/// let mut base = SchemaModel::new();
/// base.add(TargetInfo::new("Build").with_description("base"));
///
/// let mut overlay = SchemaModel::new();
/// overlay.add(TargetInfo::new("build").with_description("overlay"));
///
/// let m1 = merge_models(&base, &overlay, MergeStrategy::PreferBase);
/// assert_eq!(m1.get_target("Build").unwrap().description.as_deref(), Some("base"));
///
/// let m2 = merge_models(&base, &overlay, MergeStrategy::PreferOverlay);
/// assert_eq!(m2.get_target("Build").unwrap().description.as_deref(), Some("overlay"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Keep base entities when both fragments declare the same name.
    PreferBase,
    /// Replace base entities with overlay entities of the same name.
    PreferOverlay,
    /// Overlay wins for entities, but item metadata is combined from both.
    #[default]
    Union,
}

/// Merges two models into one.
///
/// Entities are matched by name ignoring case. Base order is kept; new
/// overlay entities are appended in overlay order. Imports are concatenated
/// without duplicates.
pub fn merge_models(
    base: &SchemaModel,
    overlay: &SchemaModel,
    strategy: MergeStrategy,
) -> SchemaModel {
    let mut merged = base.clone();

    merge_map(&mut merged.properties, &overlay.properties, strategy);
    merge_map(&mut merged.tasks, &overlay.tasks, strategy);
    merge_map(&mut merged.targets, &overlay.targets, strategy);

    for (name, item) in overlay.items.iter() {
        match merged.items.get_mut(name) {
            None => {
                merged.items.insert(name, item.clone());
            }
            Some(existing) => match strategy {
                MergeStrategy::PreferBase => {}
                MergeStrategy::PreferOverlay => *existing = item.clone(),
                MergeStrategy::Union => *existing = union_items(existing, item),
            },
        }
    }

    for import in &overlay.imports {
        if !merged.imports.contains(import) {
            merged.imports.push(import.clone());
        }
    }

    merged
}

fn merge_map<V: Clone>(base: &mut NameMap<V>, overlay: &NameMap<V>, strategy: MergeStrategy) {
    for (name, value) in overlay.iter() {
        if strategy == MergeStrategy::PreferBase && base.contains(name) {
            continue;
        }
        base.insert(name, value.clone());
    }
}

fn union_items(base: &ItemInfo, overlay: &ItemInfo) -> ItemInfo {
    let mut merged = overlay.clone();
    merged.description = overlay
        .description
        .clone()
        .or_else(|| base.description.clone());
    merged.include_description = overlay
        .include_description
        .clone()
        .or_else(|| base.include_description.clone());

    let mut metadata = base.metadata.clone();
    for (name, meta) in overlay.metadata.iter() {
        metadata.insert(name, meta.clone());
    }
    merged.metadata = metadata;
    merged
}
