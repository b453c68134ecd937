//! Error types for schema loading.
//!
//! These are the fatal failures: the document is structurally broken, a
//! custom-type name is malformed, or the input could not be obtained at all.
//! Everything recoverable is reported through
//! [`Diagnostics`](build_schema_core::Diagnostics) instead.

use thiserror::Error;

/// Errors that abort a schema load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The text is not well-formed JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Catalog YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The document root is not a JSON object.
    #[error("schema root must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// A value has a JSON shape other than the one required at its position.
    #[error("expected {expected} at '{path}', found {found}")]
    UnexpectedShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A custom-type name violates the naming rule.
    #[error("invalid custom type name '{0}': use alphanumeric segments separated by single dashes")]
    InvalidCustomTypeName(String),

    /// No embedded resource is registered under the identifier.
    #[error("embedded schema resource not found: {0}")]
    ResourceNotFound(String),

    /// A catalog lists no schemas.
    #[error("catalog lists no schemas")]
    NoSchemas,
}

/// Convenience alias for results with [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;
