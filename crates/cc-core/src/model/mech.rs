//! Entities that carry an inventory of mounted items.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::identifier::{Description, Identifiable};
use crate::model::MountedItem;

/// An entity with a mutable inventory.
///
/// The entity is owned by the host. The core only reads the inventory and
/// replaces it as a whole.
pub trait Loadout: Identifiable {
    /// Display name, used in logs.
    fn name(&self) -> &str;

    /// Mounted items in mount order.
    fn inventory(&self) -> &[MountedItem];

    /// Replace the inventory.
    fn set_inventory(&mut self, items: Vec<MountedItem>);

    /// Re-synthesize equipment the entity always carries.
    fn refresh(&mut self) {}
}

/// A mech definition: a chassis with fixed equipment and an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MechDef {
    pub description: Description,
    /// Equipment that belongs to the chassis
    #[serde(default)]
    pub chassis_fixed: Vec<MountedItem>,
    #[serde(default)]
    pub inventory: Vec<MountedItem>,
}

impl MechDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            description: Description::new(id, name),
            chassis_fixed: Vec::new(),
            inventory: Vec::new(),
        }
    }

    /// Add chassis fixed equipment; it is mounted right away.
    pub fn with_fixed(mut self, item: MountedItem) -> Self {
        let item = MountedItem { fixed: true, ..item };
        self.inventory.push(item.clone());
        self.chassis_fixed.push(item);
        self
    }

    pub fn with_item(mut self, item: MountedItem) -> Self {
        self.inventory.push(item);
        self
    }
}

impl Identifiable for MechDef {
    fn description(&self) -> Option<&Description> {
        Some(&self.description)
    }
}

impl Loadout for MechDef {
    fn name(&self) -> &str {
        &self.description.name
    }

    fn inventory(&self) -> &[MountedItem] {
        &self.inventory
    }

    fn set_inventory(&mut self, items: Vec<MountedItem>) {
        self.inventory = items;
    }

    /// Mount any chassis fixed equipment missing from the inventory.
    fn refresh(&mut self) {
        let mut mounted: HashMap<&MountedItem, usize> = HashMap::new();
        for item in &self.inventory {
            *mounted.entry(item).or_default() += 1;
        }

        let mut missing = Vec::new();
        for item in &self.chassis_fixed {
            match mounted.get_mut(item) {
                Some(count) if *count > 0 => *count -= 1,
                _ => missing.push(item.clone()),
            }
        }

        if !missing.is_empty() {
            tracing::debug!(mech = %self.description.id, count = missing.len(), "Re-adding fixed equipment");
            self.inventory.extend(missing);
        }
    }
}
