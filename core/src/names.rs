//! Case-insensitive name maps.
//!
//! Every name in a build schema (property, item, metadata, task, target and
//! custom type names) is compared ignoring ASCII case. [`NameMap`] keys its
//! entries by the lowercased name and keeps insertion order, so enumeration
//! is deterministic across loads.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Ordered map from names to values with ASCII-case-insensitive lookup.
///
/// # Examples
///
/// ```
/// use build_schema_core::NameMap;
///
/// let mut map = NameMap::new();
/// map.insert("MyProp", 1);
/// assert_eq!(map.get("myprop"), Some(&1));
/// assert_eq!(map.get("MYPROP"), Some(&1));
///
/// // Reinserting under a different casing replaces the value but keeps
/// // the original position.
/// map.insert("MYPROP", 2);
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.get("MyProp"), Some(&2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NameMap<V> {
    entries: IndexMap<String, (String, V)>,
}

impl<V> NameMap<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    fn key(name: &str) -> String {
        name.to_ascii_lowercase()
    }

    /// Inserts a value, returning the previous value stored under the same
    /// name (ignoring case). The most recent spelling of the name is kept.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        self.entries
            .insert(Self::key(&name), (name, value))
            .map(|(_, old)| old)
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(&Self::key(name)).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        self.entries.get_mut(&Self::key(name)).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&Self::key(name))
    }

    /// Removes an entry, preserving the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        self.entries.shift_remove(&Self::key(name)).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, value)` pairs in insertion order, with names as
    /// they were spelled on insertion.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.values().map(|(name, v)| (name.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut().map(|(_, v)| v)
    }

    /// Returns the value for `name`, inserting one built by `make` if absent.
    pub fn get_or_insert_with(&mut self, name: &str, make: impl FnOnce() -> V) -> &mut V {
        let (_, value) = self
            .entries
            .entry(Self::key(name))
            .or_insert_with(|| (name.to_string(), make()));
        value
    }
}

impl<V> Default for NameMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Serialize> Serialize for NameMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<N: Into<String>, V> FromIterator<(N, V)> for NameMap<V> {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let map: NameMap<i32> = [("Compile", 1), ("EmbeddedResource", 2)].into_iter().collect();
        assert!(map.contains("compile"));
        assert!(map.contains("EMBEDDEDRESOURCE"));
        assert!(!map.contains("None"));
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let map: NameMap<()> = [("b", ()), ("A", ()), ("c", ())].into_iter().collect();
        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, vec!["b", "A", "c"]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: NameMap<i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(map.remove("B"), Some(2));
        let values: Vec<i32> = map.values().copied().collect();
        assert_eq!(values, vec![1, 3]);
    }

    #[test]
    fn test_get_or_insert_with_only_builds_once() {
        let mut map: NameMap<Vec<i32>> = NameMap::new();
        map.get_or_insert_with("Foo", Vec::new).push(1);
        map.get_or_insert_with("FOO", || vec![99]).push(2);
        assert_eq!(map.get("foo"), Some(&vec![1, 2]));
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["Foo"]);
    }

    #[test]
    fn test_serializes_as_map_with_original_names() {
        let mut map = NameMap::new();
        map.insert("Zeta", 1);
        map.insert("alpha", 2);
        map.insert("ZETA", 3);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"ZETA":3,"alpha":2}"#);
    }
}
