//! Core schema model for build-language tooling.
//!
//! This crate defines the vocabulary a build schema declares, in the form
//! consumed by completion, hover and validation engines:
//!
//! - [`SchemaModel`]: case-insensitive maps of properties, items, tasks and
//!   targets plus the list of IntelliSense imports.
//! - [`PropertyInfo`], [`ItemInfo`], [`MetadataInfo`], [`TaskInfo`],
//!   [`TargetInfo`]: the entities, all implementing [`BaseInfo`].
//! - [`CustomTypeInfo`]: user-defined enumerations of literal values.
//! - [`ValueKind`]: base kind plus list/literal/custom-type modifiers.
//! - [`Diagnostics`]: ordered, non-fatal problems found while loading.
//!
//! Loading schemas from JSON lives in the `build-schema-loader` crate.
//!
//! Fragments can be composed with [`merge_models`] and checked with
//! [`validate_model`].
//!
//! # Example
//!
//! ```
//! use build_schema_core::*;
//!
//! let mut model = SchemaModel::new();
//! model.add(
//!     PropertyInfo::new("TargetFrameworks")
//!         .with_description("Frameworks to build for")
//!         .with_kind(ValueKind::new(BaseKind::TargetFramework).with(KindModifiers::LIST)),
//! );
//!
//! let prop = model.get_property("targetframeworks").unwrap();
//! assert!(prop.kind.is_list());
//! assert!(validate_model(&model).is_empty());
//! ```

mod diagnostics;
mod kind;
mod merge;
mod model;
mod names;
mod types;
mod validate;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use kind::{BaseKind, KindModifiers, ValueKind};
pub use merge::{MergeStrategy, merge_models};
pub use model::{SchemaEntity, SchemaModel};
pub use names::NameMap;
pub use types::*;
pub use validate::{ValidationError, validate_custom_type_name, validate_model};
