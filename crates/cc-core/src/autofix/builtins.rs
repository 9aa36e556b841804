//! Built-in repair passes

use std::collections::HashMap;

use super::FixContext;
use crate::Result;
use crate::model::{Loadout, MountedItem};

/// Drop mounted items whose definition is missing from the catalog.
pub fn remove_empty_refs(mech: &mut dyn Loadout, ctx: &FixContext<'_>) -> Result<bool> {
    let (valid, missing): (Vec<MountedItem>, Vec<MountedItem>) = mech
        .inventory()
        .iter()
        .cloned()
        .partition(|item| ctx.data.contains(&item.component_id));

    if missing.is_empty() {
        return Ok(false);
    }

    for item in &missing {
        tracing::error!(
            mech = %mech.name(),
            id = mech.identifier().unwrap_or_default(),
            component = %item.component_id,
            location = %item.location,
            "Dropping item with missing definition"
        );
    }

    mech.set_inventory(valid);
    Ok(true)
}

/// Rebuild chassis fixed equipment and fill empty default slots.
///
/// Fixed items without a definition are dropped again after the rebuild.
/// When the rebuilt inventory holds the same items as before, the original
/// order is kept and the mech counts as unchanged.
pub fn re_add_fixed(mech: &mut dyn Loadout, ctx: &FixContext<'_>) -> Result<bool> {
    let before = mech.inventory().to_vec();

    mech.set_inventory(before.iter().filter(|i| !i.fixed).cloned().collect());
    mech.refresh();

    let (kept, missing): (Vec<MountedItem>, Vec<MountedItem>) = mech
        .inventory()
        .iter()
        .cloned()
        .partition(|item| !item.fixed || ctx.data.contains(&item.component_id));
    for item in &missing {
        tracing::error!(
            mech = %mech.name(),
            id = mech.identifier().unwrap_or_default(),
            component = %item.component_id,
            location = %item.location,
            "Dropping fixed item with missing definition"
        );
    }
    mech.set_inventory(kept);
    ctx.engine().fill_defaults(mech);

    if same_items(mech.inventory(), &before) {
        mech.set_inventory(before);
        return Ok(false);
    }

    tracing::debug!(mech = %mech.name(), "Re-added fixed equipment");
    Ok(true)
}

/// Whether both inventories hold the same items, ignoring order.
fn same_items(a: &[MountedItem], b: &[MountedItem]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut counts: HashMap<&MountedItem, usize> = HashMap::new();
    for item in a {
        *counts.entry(item).or_default() += 1;
    }
    b.iter().all(|item| match counts.get_mut(item) {
        Some(count) if *count > 0 => {
            *count -= 1;
            true
        }
        _ => false,
    })
}
