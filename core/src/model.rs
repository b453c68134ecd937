//! The resolved schema model.

use serde::Serialize;

use crate::{BaseInfo, ItemInfo, NameMap, PropertyInfo, TargetInfo, TaskInfo};

/// A top-level entity that can be added to a [`SchemaModel`] by name.
///
/// Metadata and custom types are not top-level entities: metadata belongs
/// to an item and custom types are attached to the fields that use them.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaEntity {
    Property(PropertyInfo),
    Item(ItemInfo),
    Task(TaskInfo),
    Target(TargetInfo),
}

impl From<PropertyInfo> for SchemaEntity {
    fn from(info: PropertyInfo) -> Self {
        Self::Property(info)
    }
}

impl From<ItemInfo> for SchemaEntity {
    fn from(info: ItemInfo) -> Self {
        Self::Item(info)
    }
}

impl From<TaskInfo> for SchemaEntity {
    fn from(info: TaskInfo) -> Self {
        Self::Task(info)
    }
}

impl From<TargetInfo> for SchemaEntity {
    fn from(info: TargetInfo) -> Self {
        Self::Target(info)
    }
}

/// The vocabulary declared by one or more schema documents.
///
/// All name lookups ignore ASCII case.
///
/// # Examples
///
/// ```
/// use build_schema_core::*;
///
/// let mut model = SchemaModel::new();
/// model.add(PropertyInfo::new("MyProp").with_description("Something"));
/// model.add(TargetInfo::new("Build"));
///
/// assert!(model.get_property("myprop").is_some());
/// assert!(model.get_target("BUILD").is_some());
/// assert_eq!(model.all_entities().count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaModel {
    pub properties: NameMap<PropertyInfo>,
    pub items: NameMap<ItemInfo>,
    pub tasks: NameMap<TaskInfo>,
    pub targets: NameMap<TargetInfo>,
    /// Identifiers of other schemas this one pulls in for IntelliSense.
    pub imports: Vec<String>,
}

impl SchemaModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a top-level entity by name, replacing any entity of the same
    /// kind and name.
    pub fn add(&mut self, entity: impl Into<SchemaEntity>) {
        match entity.into() {
            SchemaEntity::Property(info) => {
                self.properties.insert(info.name.clone(), info);
            }
            SchemaEntity::Item(info) => {
                self.items.insert(info.name.clone(), info);
            }
            SchemaEntity::Task(info) => {
                self.tasks.insert(info.name.clone(), info);
            }
            SchemaEntity::Target(info) => {
                self.targets.insert(info.name.clone(), info);
            }
        }
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.get(name)
    }

    pub fn get_item(&self, name: &str) -> Option<&ItemInfo> {
        self.items.get(name)
    }

    pub fn get_task(&self, name: &str) -> Option<&TaskInfo> {
        self.tasks.get(name)
    }

    pub fn get_target(&self, name: &str) -> Option<&TargetInfo> {
        self.targets.get(name)
    }

    /// Every top-level entity: items, then properties, then tasks, then
    /// targets.
    pub fn all_entities(&self) -> impl Iterator<Item = &dyn BaseInfo> {
        self.items
            .values()
            .map(|i| i as &dyn BaseInfo)
            .chain(self.properties.values().map(|p| p as &dyn BaseInfo))
            .chain(self.tasks.values().map(|t| t as &dyn BaseInfo))
            .chain(self.targets.values().map(|t| t as &dyn BaseInfo))
    }

    /// Total number of top-level entities.
    pub fn entity_count(&self) -> usize {
        self.items.len() + self.properties.len() + self.tasks.len() + self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0 && self.imports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_all_entities_order() {
        let mut model = SchemaModel::new();
        model.add(TargetInfo::new("Build"));
        model.add(TaskInfo::new("Exec"));
        model.add(PropertyInfo::new("Configuration"));
        model.add(ItemInfo::new("Compile"));

        let names: Vec<&str> = model.all_entities().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Compile", "Configuration", "Exec", "Build"]);
    }

    #[test]
    fn test_add_replaces_same_name_ignoring_case() {
        let mut model = SchemaModel::new();
        model.add(PropertyInfo::new("OutputPath").with_description("old"));
        model.add(PropertyInfo::new("outputpath").with_description("new"));

        assert_eq!(model.properties.len(), 1);
        let prop = model.get_property("OUTPUTPATH").unwrap();
        assert_eq!(prop.description.as_deref(), Some("new"));
    }

    #[test]
    fn test_same_name_in_different_kinds_coexists() {
        let mut model = SchemaModel::new();
        model.add(ItemInfo::new("Build"));
        model.add(TargetInfo::new("Build"));
        assert_eq!(model.entity_count(), 2);
        assert!(!model.is_empty());
    }

    #[test]
    fn test_serializes_sections_by_name() {
        let mut model = SchemaModel::new();
        model.add(TargetInfo::new("Build").with_description("Builds"));
        model.imports.push("Sdk.Common".to_string());

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["targets"]["Build"], json!({ "name": "Build", "description": "Builds" }));
        assert_eq!(value["properties"], json!({}));
        assert_eq!(value["imports"], json!(["Sdk.Common"]));
    }
}
