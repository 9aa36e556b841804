//! Mounted items and the changes proposed for them.

use cc_meta::ChassisLocation;
use serde::{Deserialize, Serialize};

use crate::identifier::Identifiable;

/// A component mounted at a location on a mech.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MountedItem {
    /// Id of the component definition
    pub component_id: String,
    /// Where the item is mounted
    pub location: ChassisLocation,
    /// Chassis fixed equipment, never removed by the engine
    #[serde(default)]
    pub fixed: bool,
}

impl MountedItem {
    pub fn new(component_id: impl Into<String>, location: ChassisLocation) -> Self {
        Self {
            component_id: component_id.into(),
            location,
            fixed: false,
        }
    }

    /// An item that belongs to the chassis.
    pub fn fixed(component_id: impl Into<String>, location: ChassisLocation) -> Self {
        Self {
            fixed: true,
            ..Self::new(component_id, location)
        }
    }

    /// The same item at another location.
    pub fn moved_to(&self, location: ChassisLocation) -> Self {
        Self {
            location,
            ..self.clone()
        }
    }
}

impl Identifiable for MountedItem {
    fn identifier(&self) -> Option<&str> {
        Some(self.component_id.as_str()).filter(|id| !id.is_empty())
    }
}

/// A mutation queued while validating one transaction.
///
/// Changes are applied by the caller only if the transaction commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Change {
    Add(MountedItem),
    Remove(MountedItem),
}

impl Change {
    pub fn item(&self) -> &MountedItem {
        match self {
            Change::Add(item) | Change::Remove(item) => item,
        }
    }

    pub fn is_add(&self) -> bool {
        matches!(self, Change::Add(_))
    }

    pub fn is_remove(&self) -> bool {
        matches!(self, Change::Remove(_))
    }

    /// Apply this change to an inventory.
    ///
    /// A remove takes out the first equal item; removing an item that is not
    /// present leaves the inventory unchanged.
    pub fn apply(&self, inventory: &mut Vec<MountedItem>) {
        match self {
            Change::Add(item) => inventory.push(item.clone()),
            Change::Remove(item) => {
                if let Some(pos) = inventory.iter().position(|i| i == item) {
                    inventory.remove(pos);
                }
            }
        }
    }
}
