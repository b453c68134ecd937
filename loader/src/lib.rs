//! Loading of JSON build schemas into a resolved schema model.
//!
//! This crate reads schema documents describing the vocabulary of a build
//! language and resolves them into a
//! [`SchemaModel`](build_schema_core::SchemaModel): custom types are
//! registered first, type tokens are resolved against them, shared metadata
//! groups are applied to items, and every recoverable authoring problem is
//! collected as a [`Diagnostic`](build_schema_core::Diagnostic).
//!
//! # Quick start
//!
//! ```
//! use build_schema_loader::SchemaLoader;
//!
//! let outcome = SchemaLoader::load_str(r#"{
//!     "properties": {
//!         "Nullable": { "description": "Nullable context", "type": "@nullable-mode" },
//!         "DefineConstants": { "type": "string-list" }
//!     },
//!     "customTypes": {
//!         "nullable-mode": { "enable": "On", "disable": "Off" }
//!     }
//! }"#).unwrap();
//!
//! let nullable = outcome.model.get_property("nullable").unwrap();
//! assert_eq!(nullable.custom_type.as_ref().unwrap().values.len(), 2);
//! assert!(outcome.model.get_property("DefineConstants").unwrap().kind.is_list());
//! assert!(outcome.diagnostics.is_empty());
//! ```
//!
//! # Failure tiers
//!
//! Malformed input that still yields a meaningful model is reported through
//! [`Diagnostics`](build_schema_core::Diagnostics). Structurally broken
//! documents (root not an object, wrong JSON shape for a section or field,
//! invalid custom-type names) and missing embedded resources fail with
//! [`LoadError`].
//!
//! Catalogs ([`SchemaCatalog`]) compose several schema files into one model.

mod builders;
mod catalog;
mod custom_types;
mod error;
mod groups;
mod json;
mod loader;
mod resources;
mod value_kind;

pub use catalog::{CatalogOutcome, FileDiagnostics, SchemaCatalog};
pub use error::{LoadError, Result};
pub use loader::{LoadOutcome, SchemaLoader};
pub use resources::EmbeddedResources;
