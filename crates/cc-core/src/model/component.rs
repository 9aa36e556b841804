//! Component definitions and the catalog they are resolved from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::identifier::{Description, Identifiable};

/// A component definition as loaded by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDef {
    pub description: Description,
}

impl ComponentDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            description: Description::new(id, name),
        }
    }

    pub fn id(&self) -> &str {
        &self.description.id
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.description.details = details.into();
        self
    }
}

impl Identifiable for ComponentDef {
    fn identifier(&self) -> Option<&str> {
        Some(self.description.id.as_str()).filter(|id| !id.is_empty())
    }

    fn description(&self) -> Option<&Description> {
        Some(&self.description)
    }
}

/// Catalog of loaded component definitions.
///
/// Mounted items refer to definitions by id; an id missing from the catalog
/// is a corrupt reference.
#[derive(Debug, Clone, Default)]
pub struct DataManager {
    components: HashMap<String, ComponentDef>,
}

impl DataManager {
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Add or replace a definition.
    pub fn add(&mut self, def: ComponentDef) {
        self.components.insert(def.id().to_string(), def);
    }

    pub fn get(&self, id: &str) -> Option<&ComponentDef> {
        self.components.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Drop every definition.
    pub fn clear(&mut self) {
        self.components.clear();
    }
}
