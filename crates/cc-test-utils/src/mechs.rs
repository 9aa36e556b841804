//! Mech definition builders.

use cc_core::{Loadout, MechDef, MountedItem};
use cc_meta::ChassisLocation;

/// An Atlas with a fixed cockpit, an engine and an AC/20.
pub fn atlas() -> MechDef {
    MechDef::new("mechdef_atlas_AS7-D", "Atlas")
        .with_fixed(MountedItem::new("Gear_Cockpit", ChassisLocation::Head))
        .with_item(MountedItem::new("Gear_Engine_300", ChassisLocation::CenterTorso))
        .with_item(MountedItem::new("Weapon_AC20", ChassisLocation::RightTorso))
}

/// `mech` with a jump jet mounted in each of `locations`.
pub fn with_jets(mech: MechDef, locations: &[ChassisLocation]) -> MechDef {
    locations.iter().fold(mech, |mech, location| {
        mech.with_item(MountedItem::new("Gear_JumpJet", *location))
    })
}

/// Component ids of the inventory in order.
pub fn ids(mech: &dyn Loadout) -> Vec<&str> {
    mech.inventory()
        .iter()
        .map(|item| item.component_id.as_str())
        .collect()
}

/// Number of mounted items with `component_id`.
pub fn count(mech: &dyn Loadout, component_id: &str) -> usize {
    mech.inventory()
        .iter()
        .filter(|item| item.component_id == component_id)
        .count()
}
