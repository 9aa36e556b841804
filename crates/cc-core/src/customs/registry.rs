//! Registry of customs keyed by entity identifier
//!
//! The registry is the single owner of custom entries. [`CustomRegistry::set`]
//! is the only way entries are added or replaced, so the dedup invariants
//! hold for every key:
//!
//! - at most one entry per identity for kinds without arrays;
//! - at most one entry per (identity, replace id) for kinds with arrays.

use std::collections::HashMap;

use super::Custom;
use crate::identifier::{self, Identifiable};

/// Central registry mapping entity keys to their customs.
///
/// Entries keep insertion order; lookups return the first match.
#[derive(Debug, Default)]
pub struct CustomRegistry {
    customs: HashMap<String, Vec<Box<dyn Custom>>>,
}

impl CustomRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            customs: HashMap::new(),
        }
    }

    /// Attach `custom` to `key`.
    ///
    /// If an entry with the same identity (and, for array kinds, the same
    /// replace id) already exists it is overwritten in place when `replace`
    /// is true; otherwise the call is rejected and nothing changes. Without a
    /// matching entry the custom is appended.
    ///
    /// Returns whether the custom was stored.
    pub fn set(&mut self, key: &str, custom: Box<dyn Custom>, replace: bool) -> bool {
        tracing::debug!(key, custom = ?custom, replace, "Setting custom");

        let kind = custom.kind();
        let identity = kind.identity();
        let entries = self.customs.entry(key.to_string()).or_default();

        let existing = entries.iter().position(|entry| {
            if entry.kind().identity() != identity {
                return false;
            }
            if !kind.allow_array {
                return true;
            }
            match (custom.replace_id(), entry.replace_id()) {
                (Some(new_id), Some(old_id)) => new_id == old_id,
                _ => false,
            }
        });

        match existing {
            Some(index) if replace => {
                tracing::debug!(key, %identity, from = ?entries[index], "Replacing custom");
                entries[index] = custom;
                true
            }
            Some(index) => {
                tracing::debug!(key, %identity, existing = ?entries[index], "Custom already set, not replacing");
                false
            }
            None => {
                entries.push(custom);
                true
            }
        }
    }

    /// [`set`](Self::set) every custom in order, returning how many were stored.
    pub fn set_all(&mut self, key: &str, customs: Vec<Box<dyn Custom>>, replace: bool) -> usize {
        let mut stored = 0;
        for custom in customs {
            let name = custom.kind().name;
            if self.set(key, custom, replace) {
                stored += 1;
            } else {
                tracing::debug!(key, custom = name, "Custom not attached, identity already set");
            }
        }
        stored
    }

    /// All entries for `key`, in insertion order.
    pub fn entries(&self, key: &str) -> &[Box<dyn Custom>] {
        self.customs.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entries of type `T` for `key`, in insertion order.
    ///
    /// An unknown key yields nothing.
    pub fn get<T: Custom>(&self, key: &str) -> impl Iterator<Item = &T> {
        self.entries(key)
            .iter()
            .filter_map(|custom| custom.as_any().downcast_ref::<T>())
    }

    /// First entry of type `T` for `key`.
    pub fn get_first<T: Custom>(&self, key: &str) -> Option<&T> {
        self.get::<T>(key).next()
    }

    /// Whether `key` has an entry of type `T`.
    pub fn is<T: Custom>(&self, key: &str) -> bool {
        self.get_first::<T>(key).is_some()
    }

    /// Entries of type `T` for the key of `target`.
    pub fn get_for<T: Custom>(&self, target: &dyn Identifiable) -> impl Iterator<Item = &T> {
        let key = identifier::identifier(Some(target));
        self.entries(&key)
            .iter()
            .filter_map(|custom| custom.as_any().downcast_ref::<T>())
    }

    /// Whether the key of `target` has an entry of type `T`.
    pub fn is_for<T: Custom>(&self, target: &dyn Identifiable) -> bool {
        self.get_for::<T>(target).next().is_some()
    }

    /// Resolve the key of `target`; see [`identifier::identifier`].
    pub fn identifier(target: Option<&dyn Identifiable>) -> String {
        identifier::identifier(target)
    }

    /// Number of keys with entries.
    pub fn len(&self) -> usize {
        self.customs.values().filter(|v| !v.is_empty()).count()
    }

    /// Whether the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    ///
    /// Called when the host reloads all definitions.
    pub fn clear(&mut self) {
        tracing::debug!(keys = self.customs.len(), "Clearing custom registry");
        self.customs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customs::{Category, CustomKind, Flags, RgbColor, UiColor};
    use std::any::Any;

    #[derive(Debug, PartialEq)]
    struct Note(&'static str);

    static NOTE: CustomKind = CustomKind::new("Note");

    impl Custom for Note {
        fn kind(&self) -> &'static CustomKind {
            &NOTE
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn category(id: &str, owner: &str) -> Box<dyn Custom> {
        Box::new(Category::new(id, owner))
    }

    #[test]
    fn test_empty_registry() {
        let registry = CustomRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.get::<Note>("missing").count(), 0);
        assert!(registry.entries("missing").is_empty());
    }

    #[test]
    fn test_set_appends_new_identity() {
        let mut registry = CustomRegistry::new();
        assert!(registry.set("Gear_A", Box::new(Note("a")), false));
        assert!(registry.set("Gear_A", Box::new(Flags::new(["default"])), false));

        assert_eq!(registry.entries("Gear_A").len(), 2);
        assert_eq!(registry.len(), 1);
        assert!(registry.is::<Note>("Gear_A"));
        assert!(registry.is::<Flags>("Gear_A"));
    }

    #[test]
    fn test_set_rejects_without_replace() {
        let mut registry = CustomRegistry::new();
        assert!(registry.set("Gear_A", Box::new(Note("first")), false));
        assert!(!registry.set("Gear_A", Box::new(Note("second")), false));

        let notes: Vec<_> = registry.get::<Note>("Gear_A").collect();
        assert_eq!(notes, vec![&Note("first")]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut registry = CustomRegistry::new();
        registry.set("Gear_A", Box::new(Note("first")), false);
        registry.set("Gear_A", Box::new(Flags::new(["default"])), false);
        assert!(registry.set("Gear_A", Box::new(Note("second")), true));

        let entries = registry.entries("Gear_A");
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].as_any().downcast_ref::<Note>(),
            Some(&Note("second"))
        );
    }

    #[test]
    fn test_array_entries_coexist_by_replace_id() {
        let mut registry = CustomRegistry::new();
        assert!(registry.set("Gear_A", category("Jump", "Gear_A"), false));
        assert!(registry.set("Gear_A", category("Heat", "Gear_A"), false));
        assert!(!registry.set("Gear_A", category("Jump", "Gear_A"), false));

        let ids: Vec<_> = registry
            .get::<Category>("Gear_A")
            .map(|c| c.category_id.as_str())
            .collect();
        assert_eq!(ids, vec!["Jump", "Heat"]);
    }

    #[test]
    fn test_array_replace_only_touches_matching_id() {
        let mut registry = CustomRegistry::new();
        registry.set("Gear_A", category("Jump", "Gear_A"), false);
        registry.set("Gear_A", category("Heat", "Gear_A"), false);

        let tagged = Category::new("Heat", "Gear_A").with_tag("sink");
        assert!(registry.set("Gear_A", Box::new(tagged), true));

        let categories: Vec<_> = registry.get::<Category>("Gear_A").collect();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].tag(), "Gear_A");
        assert_eq!(categories[1].tag(), "sink");
    }

    #[test]
    fn test_group_identity_replaces_across_names() {
        let mut registry = CustomRegistry::new();
        registry.set("Gear_A", Box::new(UiColor::new("Energy")), false);
        assert!(!registry.set("Gear_A", Box::new(RgbColor::parse("#ff0000")), false));
        assert!(registry.set("Gear_A", Box::new(RgbColor::parse("#ff0000")), true));

        assert!(!registry.is::<UiColor>("Gear_A"));
        assert!(registry.is::<RgbColor>("Gear_A"));
        assert_eq!(registry.entries("Gear_A").len(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut registry = CustomRegistry::new();
        registry.set("Gear_A", Box::new(Note("a")), false);
        assert!(registry.set("Gear_B", Box::new(Note("b")), false));
        assert_eq!(registry.get_first::<Note>("Gear_B"), Some(&Note("b")));
    }

    #[test]
    fn test_lookup_through_target() {
        let mut registry = CustomRegistry::new();
        registry.set("Gear_A", Box::new(Note("a")), false);

        let def = crate::model::ComponentDef::new("Gear_A", "A");
        assert!(registry.is_for::<Note>(&def));
        assert_eq!(registry.get_for::<Note>(&def).count(), 1);
        assert_eq!(CustomRegistry::identifier(Some(&def)), "Gear_A");
        assert_eq!(CustomRegistry::identifier(None), "");
    }

    #[test]
    fn test_clear() {
        let mut registry = CustomRegistry::new();
        registry.set("Gear_A", Box::new(Note("a")), false);
        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.is::<Note>("Gear_A"));
    }
}
