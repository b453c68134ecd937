//! Schemas embedded in the binary.
//!
//! Applications that ship schemas register them with `include_str!` and
//! load them by identifier:
//!
//! ```ignore
//! let resources = EmbeddedResources::new()
//!     .with("Sdk.buildschema.json", include_str!("../schemas/Sdk.buildschema.json"));
//! let outcome = SchemaLoader::load_embedded(&resources, "Sdk.buildschema.json")?;
//! ```

use crate::error::{LoadError, Result};

/// Registry of embedded schema texts keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    entries: Vec<(String, &'static str)>,
}

impl EmbeddedResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource, replacing any resource with the same identifier.
    pub fn with(mut self, id: impl Into<String>, text: &'static str) -> Self {
        self.insert(id, text);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, text: &'static str) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((id, text)),
        }
    }

    /// Returns the text registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ResourceNotFound`] if nothing is registered under
    /// `id`.
    pub fn get(&self, id: &str) -> Result<&'static str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, text)| *text)
            .ok_or_else(|| LoadError::ResourceNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
