//! Schema catalogs: YAML configuration listing schema fragments to compose.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! schemas:
//!   - sdk/Common.buildschema.json
//!   - packages/NuGet.buildschema.json
//!   - Project.buildschema.json
//! merge: union
//! deny_warnings: false
//! ```
//!
//! Schema paths are relative to the directory holding the catalog file.
//! Fragments are loaded in order and merged onto each other with the
//! catalog's [`MergeStrategy`].

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use build_schema_core::{Diagnostics, MergeStrategy, SchemaModel, merge_models};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LoadError, Result};
use crate::loader::SchemaLoader;

/// Configuration listing the schema fragments of one composed model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaCatalog {
    /// Catalog format version (e.g., `"1.0"`).
    pub version: String,
    /// Schema files, in composition order.
    pub schemas: Vec<PathBuf>,
    /// How later fragments are merged onto earlier ones.
    #[serde(default)]
    pub merge: MergeStrategy,
    /// Treat warnings as failures when judging the composed result.
    #[serde(default)]
    pub deny_warnings: bool,
}

/// Diagnostics of one catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDiagnostics {
    pub path: PathBuf,
    pub diagnostics: Diagnostics,
}

/// Result of loading every schema listed in a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogOutcome {
    pub model: SchemaModel,
    pub files: Vec<FileDiagnostics>,
}

impl CatalogOutcome {
    pub fn error_count(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.error_count()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.warning_count()).sum()
    }
}

impl SchemaCatalog {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            schemas: Vec::new(),
            merge: MergeStrategy::default(),
            deny_warnings: false,
        }
    }

    /// Loads a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::LoadError::IoError) if the file cannot be
    /// read, or [`YamlError`](crate::LoadError::YamlError) if parsing fails.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let catalog = serde_yaml::from_reader(reader)?;
        Ok(catalog)
    }

    /// Saves the catalog as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::LoadError::IoError) if the file cannot be
    /// written, or [`YamlError`](crate::LoadError::YamlError) if
    /// serialization fails.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Loads and composes every listed schema, resolving relative paths
    /// against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoSchemas`] for an empty catalog, or the first
    /// fatal error of any listed schema.
    pub fn load(&self, base_dir: impl AsRef<Path>) -> Result<CatalogOutcome> {
        if self.schemas.is_empty() {
            return Err(LoadError::NoSchemas);
        }
        let base_dir = base_dir.as_ref();

        let mut model = SchemaModel::new();
        let mut files = Vec::with_capacity(self.schemas.len());
        for schema in &self.schemas {
            let path = base_dir.join(schema);
            let outcome = SchemaLoader::load_path(&path)?;
            model = merge_models(&model, &outcome.model, self.merge);
            files.push(FileDiagnostics {
                path,
                diagnostics: outcome.diagnostics,
            });
        }

        info!(
            schemas = files.len(),
            entities = model.entity_count(),
            "composed schema catalog"
        );
        Ok(CatalogOutcome { model, files })
    }

    /// Returns `true` if `outcome` has no errors, and no warnings either when
    /// [`deny_warnings`](Self::deny_warnings) is set.
    pub fn accepts(&self, outcome: &CatalogOutcome) -> bool {
        outcome.error_count() == 0 && !(self.deny_warnings && outcome.warning_count() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
schemas:
  - common.json
  - project.json
merge: prefer-overlay
deny_warnings: true
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let catalog: SchemaCatalog = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(catalog.version, "1.0");
        assert_eq!(
            catalog.schemas,
            vec![PathBuf::from("common.json"), PathBuf::from("project.json")]
        );
        assert_eq!(catalog.merge, MergeStrategy::PreferOverlay);
        assert!(catalog.deny_warnings);
    }

    #[test]
    fn test_deserialize_minimal_uses_defaults() {
        let catalog: SchemaCatalog =
            serde_yaml::from_str("version: \"1.0\"\nschemas: [a.json]\n").unwrap();
        assert_eq!(catalog.merge, MergeStrategy::Union);
        assert!(!catalog.deny_warnings);
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let catalog = SchemaCatalog::new("1.0");
        assert!(matches!(catalog.load("."), Err(LoadError::NoSchemas)));
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yml");

        let original: SchemaCatalog = serde_yaml::from_str(sample_yaml()).unwrap();
        original.to_file(&path).unwrap();

        let loaded = SchemaCatalog::from_file(&path).unwrap();
        assert_eq!(loaded, original);
    }
}
