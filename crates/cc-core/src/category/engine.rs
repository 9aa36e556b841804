//! Equip-time constraint checkpoints for categories
//!
//! The external transaction engine calls the checkpoints of every
//! [`Category`] attached to the item being moved, in this order:
//!
//! 1. [`ConstraintEngine::pre_validate_drop`]
//! 2. [`ConstraintEngine::replace_validate_drop`]
//! 3. external commit of the queued changes
//! 4. [`ConstraintEngine::post_validate_drop`]
//! 5. [`ConstraintEngine::on_installed`]
//!
//! Removal goes through [`ConstraintEngine::on_item_grabbed`],
//! [`ConstraintEngine::clear_inventory`] and
//! [`ConstraintEngine::validate_drop_on_remove`], which all backfill the
//! category default when the slot would be left empty.

use std::collections::BTreeMap;

use cc_meta::{CategoryDescriptor, ChassisLocation, DEFAULT_DESCRIPTION_COLOR};

use super::{CategoryController, Rejection};
use crate::customs::{Category, CustomRegistry, Flags};
use crate::model::{Change, DataManager, Loadout, MountedItem};

/// Read-only view over the registry, category table and catalog.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintEngine<'a> {
    registry: &'a CustomRegistry,
    categories: &'a CategoryController,
    data: &'a DataManager,
    description_color: &'a str,
}

impl<'a> ConstraintEngine<'a> {
    pub fn new(
        registry: &'a CustomRegistry,
        categories: &'a CategoryController,
        data: &'a DataManager,
    ) -> Self {
        Self {
            registry,
            categories,
            data,
            description_color: DEFAULT_DESCRIPTION_COLOR,
        }
    }

    /// Use `color` for the category block added to descriptions.
    pub fn with_description_color(mut self, color: &'a str) -> Self {
        self.description_color = color;
        self
    }

    /// The `category_id` entry of a component, if it belongs to it.
    pub fn category_of(&self, component_id: &str, category_id: &str) -> Option<&'a Category> {
        let registry: &'a CustomRegistry = self.registry;
        registry
            .get::<Category>(component_id)
            .find(|c| c.category_id == category_id)
    }

    /// Every category entry of a component, in attachment order.
    pub fn categories_of(&self, component_id: &str) -> Vec<&'a Category> {
        let registry: &'a CustomRegistry = self.registry;
        registry.get::<Category>(component_id).collect()
    }

    pub fn is_category(&self, item: &MountedItem, category_id: &str) -> bool {
        self.category_of(&item.component_id, category_id).is_some()
    }

    /// Number of `category_id` items, optionally restricted to `location`.
    pub fn count(
        &self,
        category_id: &str,
        inventory: &[MountedItem],
        location: Option<ChassisLocation>,
    ) -> usize {
        inventory
            .iter()
            .filter(|item| location.is_none_or(|loc| item.location == loc))
            .filter(|item| self.is_category(item, category_id))
            .count()
    }

    /// Per-location counts of `category_id` items.
    pub fn counts(
        &self,
        category_id: &str,
        inventory: &[MountedItem],
    ) -> BTreeMap<ChassisLocation, usize> {
        let mut counts = BTreeMap::new();
        for item in inventory {
            if self.is_category(item, category_id) {
                *counts.entry(item.location).or_default() += 1;
            }
        }
        counts
    }

    /// Whether an item must stay mounted: chassis fixed or flagged `no_remove`.
    pub fn is_locked(&self, item: &MountedItem) -> bool {
        item.fixed
            || self
                .registry
                .get_first::<Flags>(&item.component_id)
                .is_some_and(Flags::no_remove)
    }

    /// Whether an item is a backfill default.
    pub fn is_default(&self, item: &MountedItem) -> bool {
        self.registry
            .get_first::<Flags>(&item.component_id)
            .is_some_and(Flags::is_default)
    }

    fn descriptor(&self, category_id: &str) -> std::borrow::Cow<'a, CategoryDescriptor> {
        let categories: &'a CategoryController = self.categories;
        categories.descriptor(category_id)
    }

    /// Reject when a non-mixable category already holds an item with a
    /// different tag.
    pub fn pre_validate_drop(
        &self,
        category: &Category,
        inventory: &[MountedItem],
    ) -> Result<(), Rejection> {
        let descriptor = self.descriptor(&category.category_id);
        if descriptor.allow_mix_tags {
            return Ok(());
        }

        let mixed = inventory.iter().any(|item| {
            self.category_of(&item.component_id, &category.category_id)
                .is_some_and(|other| other.tag() != category.tag())
        });

        if mixed {
            tracing::debug!(category = %category.category_id, tag = category.tag(), "Rejecting mixed tags");
            return Err(Rejection::MixedTags {
                category: category.category_id.clone(),
                message: descriptor.mixed(),
            });
        }
        Ok(())
    }

    /// Make room for an item dropped into `target`.
    ///
    /// When a limit is already reached, queues a `Remove` for a swappable
    /// item of the category instead of refusing. At most one `Remove` is
    /// queued per category; the local location is searched first so one
    /// removal satisfies both limits whenever possible.
    pub fn replace_validate_drop(
        &self,
        category: &Category,
        target: ChassisLocation,
        inventory: &[MountedItem],
        changes: &mut Vec<Change>,
    ) -> Result<(), Rejection> {
        let id = category.category_id.as_str();
        let descriptor = self.descriptor(id);

        if !descriptor.auto_replace || !descriptor.is_limited() {
            tracing::debug!(category = id, "No replace needed");
            return Ok(());
        }

        let already_queued = changes
            .iter()
            .any(|change| change.is_remove() && self.is_category(change.item(), id));
        if already_queued {
            tracing::debug!(category = id, "Replace already queued");
            return Ok(());
        }

        if let Some(max) = descriptor.global_limit() {
            let total = self.count(id, inventory, None);
            tracing::debug!(category = id, total, max, "Checking mech limit");

            if total >= max {
                let mut replace = self.swappable(id, inventory, target);
                if replace.is_none() && descriptor.replace_any_location {
                    replace = ChassisLocation::ALL
                        .iter()
                        .filter(|loc| **loc != target)
                        .find_map(|loc| self.swappable(id, inventory, *loc));
                }

                return match replace {
                    Some(item) => {
                        tracing::debug!(category = id, replace = %item.component_id, "Queueing replace");
                        changes.push(Change::Remove(item.clone()));
                        Ok(())
                    }
                    None => Err(Rejection::Capacity {
                        category: id.to_string(),
                        message: descriptor.maximum_reached(total),
                    }),
                };
            }
        }

        if let Some(max) = descriptor.location_limit() {
            let local = self.count(id, inventory, Some(target));
            tracing::debug!(category = id, local, max, location = %target, "Checking location limit");

            if local >= max {
                return match self.swappable(id, inventory, target) {
                    Some(item) => {
                        tracing::debug!(category = id, replace = %item.component_id, "Queueing replace");
                        changes.push(Change::Remove(item.clone()));
                        Ok(())
                    }
                    None => Err(Rejection::Capacity {
                        category: id.to_string(),
                        message: descriptor.maximum_location_reached(local, target),
                    }),
                };
            }
        }

        Ok(())
    }

    fn swappable<'i>(
        &self,
        category_id: &str,
        inventory: &'i [MountedItem],
        location: ChassisLocation,
    ) -> Option<&'i MountedItem> {
        inventory.iter().find(|item| {
            item.location == location
                && self.is_category(item, category_id)
                && !self.is_locked(item)
        })
    }

    /// Recount the proposed inventory and reject any count above a limit.
    pub fn post_validate_drop(
        &self,
        category: &Category,
        new_inventory: &[MountedItem],
    ) -> Result<(), Rejection> {
        let id = category.category_id.as_str();
        let descriptor = self.descriptor(id);

        if let Some(max) = descriptor.global_limit() {
            let total = self.count(id, new_inventory, None);
            if total > max {
                return Err(Rejection::Capacity {
                    category: id.to_string(),
                    message: descriptor.maximum_reached(max),
                });
            }
        }

        if let Some(max) = descriptor.location_limit() {
            let over = self
                .counts(id, new_inventory)
                .into_iter()
                .find(|(_, count)| *count > max);
            if let Some((location, _)) = over {
                return Err(Rejection::Capacity {
                    category: id.to_string(),
                    message: descriptor.maximum_location_reached(max, location),
                });
            }
        }

        Ok(())
    }

    /// Post-commit enforcement after `item` moved from `previous` to
    /// `desired`.
    ///
    /// Backfills the vacated location and, when the destination exceeds a
    /// limit, removes one other item of the category (defaults first).
    /// Returns the changes applied to `mech`.
    pub fn on_installed(
        &self,
        category: &Category,
        mech: &mut dyn Loadout,
        item: &MountedItem,
        previous: Option<ChassisLocation>,
        desired: Option<ChassisLocation>,
    ) -> Vec<Change> {
        let id = category.category_id.as_str();
        let mut applied = Vec::new();
        let mut inventory = mech.inventory().to_vec();

        if let Some(previous) = previous
            && let Some(replacement) = self.replacement_for(id, &inventory, previous)
        {
            tracing::debug!(category = id, added = %replacement.component_id, "Backfilling vacated location");
            inventory.push(replacement.clone());
            applied.push(Change::Add(replacement));
        }

        if let Some(desired) = desired
            && let Some(removed) = self.enforce_limits(id, &mut inventory, item, desired)
        {
            applied.push(Change::Remove(removed));
        }

        if !applied.is_empty() {
            mech.set_inventory(inventory);
        }
        applied
    }

    fn enforce_limits(
        &self,
        id: &str,
        inventory: &mut Vec<MountedItem>,
        installed: &MountedItem,
        desired: ChassisLocation,
    ) -> Option<MountedItem> {
        let descriptor = self.descriptor(id);
        if !descriptor.auto_replace || !descriptor.is_limited() {
            return None;
        }

        let total = self.count(id, inventory, None);
        let local = self.count(id, inventory, Some(desired));
        let over_location = descriptor.location_limit().is_some_and(|max| local > max);
        let over_total = descriptor.global_limit().is_some_and(|max| total > max);
        tracing::debug!(category = id, total, local, over_total, over_location, "Checking installed limits");

        if !over_total && !over_location {
            return None;
        }

        // Skip one instance equal to the installed item.
        let installed_at = inventory.iter().position(|i| i == installed);
        let candidates: Vec<usize> = (0..inventory.len())
            .filter(|index| Some(*index) != installed_at)
            .filter(|index| {
                let item = &inventory[*index];
                self.is_category(item, id) && !self.is_locked(item)
            })
            .collect();

        let at_desired = |index: &&usize| inventory[**index].location == desired;
        let default = |index: &&usize| self.is_default(&inventory[**index]);

        let mut pick = candidates
            .iter()
            .filter(at_desired)
            .find(default)
            .or_else(|| candidates.iter().find(at_desired));
        if pick.is_none() && !over_location {
            pick = candidates
                .iter()
                .find(default)
                .or_else(|| candidates.first());
        }

        match pick.copied() {
            Some(index) => {
                let removed = inventory.remove(index);
                tracing::debug!(category = id, removed = %removed.component_id, location = %removed.location, "Removed item over limit");
                Some(removed)
            }
            None => {
                tracing::warn!(category = id, location = %desired, "Limit exceeded but no item can be removed");
                None
            }
        }
    }

    /// Backfill after an item of the category was picked up from `from`.
    ///
    /// `mech` no longer holds the grabbed item. Returns the added default.
    pub fn on_item_grabbed(
        &self,
        category: &Category,
        mech: &mut dyn Loadout,
        from: ChassisLocation,
    ) -> Option<MountedItem> {
        let id = category.category_id.as_str();
        let Some(replacement) = self.replacement_for(id, mech.inventory(), from) else {
            tracing::debug!(category = id, "No replacement, skipping");
            return None;
        };

        let mut inventory = mech.inventory().to_vec();
        inventory.push(replacement.clone());
        mech.set_inventory(inventory);
        tracing::debug!(category = id, added = %replacement.component_id, location = %replacement.location, "Added default");
        Some(replacement)
    }

    /// Backfill while a caller rebuilds an inventory without `source`.
    ///
    /// `result` is the inventory being built. Returns the added default.
    pub fn clear_inventory(
        &self,
        category: &Category,
        result: &mut Vec<MountedItem>,
        source: &MountedItem,
    ) -> Option<MountedItem> {
        let replacement =
            self.replacement_for(&category.category_id, result, source.location)?;
        result.push(replacement.clone());
        Some(replacement)
    }

    /// Queue the category default when `item` is dragged off `inventory`.
    ///
    /// Nothing is queued when an `Add` for the category is already pending.
    pub fn validate_drop_on_remove(
        &self,
        category: &Category,
        item: &MountedItem,
        inventory: &[MountedItem],
        changes: &[Change],
    ) -> Option<Change> {
        let id = category.category_id.as_str();

        let mut remaining = inventory.to_vec();
        Change::Remove(item.clone()).apply(&mut remaining);

        let Some(replacement) = self.replacement_for(id, &remaining, item.location) else {
            tracing::debug!(category = id, "No replace, return");
            return None;
        };

        let pending = changes
            .iter()
            .any(|change| change.is_add() && self.is_category(change.item(), id));
        if pending {
            tracing::debug!(category = id, "Replace already added");
            return None;
        }

        tracing::debug!(category = id, added = %replacement.component_id, "Queueing default");
        Some(Change::Add(replacement))
    }

    /// Add the category display name to a description text.
    ///
    /// The name is inserted into an existing category block, or a new block
    /// is appended on its own line.
    pub fn adjust_description(&self, category: &Category, text: &str) -> String {
        let descriptor = self.descriptor(&category.category_id);
        if !descriptor.add_category_to_description {
            return text.to_string();
        }

        let open = format!("<b><color={}>[", self.description_color);
        let close = "]</color></b>";
        let name = descriptor.display_name();

        match text.find(&open) {
            Some(start) => {
                let pos = start + open.len();
                format!("{}{}, {}", &text[..pos], name, &text[pos..])
            }
            None => format!("{}\n{}{}{}", text, open, name, close),
        }
    }

    /// The default item to mount when `category_id` would be empty around
    /// `location`.
    ///
    /// Requires a `default_item` that resolves in the catalog and no item
    /// of the category left in scope: the mount location for categories
    /// with a location limit, the whole mech otherwise.
    pub fn replacement_for(
        &self,
        category_id: &str,
        inventory: &[MountedItem],
        location: ChassisLocation,
    ) -> Option<MountedItem> {
        let descriptor = self.descriptor(category_id);
        let default = descriptor.default_item.as_ref()?;

        if !self.data.contains(&default.component_id) {
            tracing::debug!(category = category_id, component = %default.component_id, "Default item not in catalog");
            return None;
        }

        let location = default.location.unwrap_or(location);
        let scope = descriptor.location_limit().map(|_| location);
        if self.count(category_id, inventory, scope) > 0 {
            return None;
        }

        Some(MountedItem::new(default.component_id.clone(), location))
    }

    /// Mount the default of every category with a fixed default location
    /// that is empty on `mech`. Returns the added items.
    pub fn fill_defaults(&self, mech: &mut dyn Loadout) -> Vec<MountedItem> {
        let mut inventory = mech.inventory().to_vec();
        let mut added = Vec::new();

        for descriptor in self.categories.iter() {
            let Some(location) = descriptor.default_item.as_ref().and_then(|d| d.location) else {
                continue;
            };
            if let Some(item) = self.replacement_for(&descriptor.name, &inventory, location) {
                tracing::debug!(category = %descriptor.name, added = %item.component_id, "Filling default");
                inventory.push(item.clone());
                added.push(item);
            }
        }

        if !added.is_empty() {
            mech.set_inventory(inventory);
        }
        added
    }

    /// Run the pre-commit checkpoints of every category of `item`.
    ///
    /// Stops at the first rejection. Changes queued by earlier categories
    /// stay in `changes`.
    pub fn validate_drop(
        &self,
        item: &MountedItem,
        target: ChassisLocation,
        inventory: &[MountedItem],
        changes: &mut Vec<Change>,
    ) -> Result<(), Rejection> {
        for category in self.categories_of(&item.component_id) {
            self.pre_validate_drop(category, inventory)?;
            self.replace_validate_drop(category, target, inventory, changes)?;
        }
        Ok(())
    }

    /// Run the post-commit check of every category of `item`.
    pub fn post_validate_item(
        &self,
        item: &MountedItem,
        new_inventory: &[MountedItem],
    ) -> Result<(), Rejection> {
        for category in self.categories_of(&item.component_id) {
            self.post_validate_drop(category, new_inventory)?;
        }
        Ok(())
    }

    /// Check every category present in `inventory` for limit and tag
    /// violations.
    pub fn validate_inventory(&self, inventory: &[MountedItem]) -> Vec<Rejection> {
        let mut seen = std::collections::BTreeSet::new();
        let mut rejections = Vec::new();

        for item in inventory {
            for category in self.categories_of(&item.component_id) {
                if !seen.insert(category.category_id.as_str()) {
                    continue;
                }
                if let Err(rejection) = self.post_validate_drop(category, inventory) {
                    rejections.push(rejection);
                }
                if let Err(rejection) = self.pre_validate_drop(category, inventory) {
                    rejections.push(rejection);
                }
            }
        }
        rejections
    }
}
