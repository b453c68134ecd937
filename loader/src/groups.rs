//! Metadata groups: one set of metadata declarations applied to many items.
//!
//! ```json
//! {
//!   "metadata": [
//!     {
//!       "$appliesTo": ["Compile", "None"],
//!       "Link": "Display path in the project tree",
//!       "Visible": { "type": "bool" }
//!     }
//!   ]
//! }
//! ```
//!
//! The first listed item owns the declarations as built. Every further item
//! gets its own copy from [`MetadataInfo::copy_for_item`], which does not
//! carry deprecation state.

use build_schema_core::{Diagnostics, ItemInfo, MetadataInfo, SchemaModel};
use serde_json::Value;
use tracing::debug;

use crate::builders::build_metadata;
use crate::custom_types::CustomTypeRegistry;
use crate::error::Result;
use crate::json::{child_path, expect_array, expect_object, is_comment_key, string_list};

const APPLIES_TO: &str = "$appliesTo";

/// Applies every group in the top-level `metadata` array.
pub(crate) fn apply_metadata_groups(
    section: &Value,
    path: &str,
    model: &mut SchemaModel,
    registry: &CustomTypeRegistry,
    diags: &mut Diagnostics,
) -> Result<()> {
    for (i, group) in expect_array(section, path)?.iter().enumerate() {
        apply_group(group, &child_path(path, &i.to_string()), model, registry, diags)?;
    }
    Ok(())
}

fn apply_group(
    group: &Value,
    path: &str,
    model: &mut SchemaModel,
    registry: &CustomTypeRegistry,
    diags: &mut Diagnostics,
) -> Result<()> {
    let map = expect_object(group, path)?;

    let Some(applies_to) = map.get(APPLIES_TO) else {
        diags.error(format!("metadata group at '{path}' has no '{APPLIES_TO}' and was skipped"));
        return Ok(());
    };
    let targets = string_list(applies_to, &child_path(path, APPLIES_TO))?;
    if targets.is_empty() {
        diags.warning(format!("metadata group at '{path}' applies to no items"));
        return Ok(());
    }

    let owners: Vec<String> = targets
        .iter()
        .map(|name| {
            model
                .items
                .get_or_insert_with(name, || ItemInfo::new(name.as_str()))
                .name
                .clone()
        })
        .collect();

    let mut declarations: Vec<MetadataInfo> = Vec::new();
    for (key, value) in map {
        if key == APPLIES_TO || is_comment_key(key) {
            continue;
        }
        if key.starts_with('$') {
            diags.warning(format!("unknown directive '{key}' in metadata group at '{path}'"));
            continue;
        }
        let meta_path = child_path(path, key);
        declarations.push(build_metadata(key, &owners[0], value, &meta_path, registry, diags)?);
    }

    debug!(
        items = owners.len(),
        metadata = declarations.len(),
        "applying metadata group"
    );

    for owner in &owners[1..] {
        if let Some(item) = model.items.get_mut(owner) {
            for meta in &declarations {
                attach(item, meta.copy_for_item(owner.as_str()), diags);
            }
        }
    }
    if let Some(first) = model.items.get_mut(&owners[0]) {
        for meta in declarations {
            attach(first, meta, diags);
        }
    }

    Ok(())
}

fn attach(item: &mut ItemInfo, meta: MetadataInfo, diags: &mut Diagnostics) {
    if item.find_metadata(&meta.name).is_some() {
        diags.warning(format!(
            "metadata '{}' on item '{}' is defined more than once",
            meta.name, item.name
        ));
    }
    item.add_metadata(meta);
}
