//! Table of category descriptors for one session

use std::borrow::Cow;
use std::collections::BTreeMap;

use cc_meta::{CategoryDescriptor, Settings};

use crate::Result;
use crate::customs::{Custom, CustomFactories, CustomRegistry};

/// Holds the single descriptor of every category.
///
/// Descriptors come from settings or are created with default policy the
/// first time a component references an unknown category.
#[derive(Debug, Clone, Default)]
pub struct CategoryController {
    categories: BTreeMap<String, CategoryDescriptor>,
}

impl CategoryController {
    pub fn new() -> Self {
        Self {
            categories: BTreeMap::new(),
        }
    }

    /// Preload the descriptors declared in settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut controller = Self::new();
        for descriptor in &settings.categories {
            controller.insert(descriptor.clone());
        }
        controller
    }

    /// Add or replace a descriptor, returning the previous one.
    pub fn insert(&mut self, descriptor: CategoryDescriptor) -> Option<CategoryDescriptor> {
        self.categories.insert(descriptor.name.clone(), descriptor)
    }

    /// The descriptor for `id`, created with default policy if unknown.
    pub fn get_or_create(&mut self, id: &str) -> &CategoryDescriptor {
        self.categories.entry(id.to_string()).or_insert_with(|| {
            tracing::debug!(category = id, "Creating category with default policy");
            CategoryDescriptor::new(id)
        })
    }

    pub fn get(&self, id: &str) -> Option<&CategoryDescriptor> {
        self.categories.get(id)
    }

    /// The descriptor for `id`, or default policy when none exists yet.
    pub fn descriptor(&self, id: &str) -> Cow<'_, CategoryDescriptor> {
        match self.categories.get(id) {
            Some(descriptor) => Cow::Borrowed(descriptor),
            None => Cow::Owned(CategoryDescriptor::new(id)),
        }
    }

    /// Descriptors ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryDescriptor> {
        self.categories.values()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Default customs of `category_id`, built for `owner`.
    ///
    /// Resolves the descriptor first, so an unknown category is created.
    pub fn defaults(
        &mut self,
        category_id: &str,
        owner: &str,
        factories: &CustomFactories,
    ) -> Result<Vec<Box<dyn Custom>>> {
        match &self.get_or_create(category_id).defaults {
            Some(defaults) => factories.build(owner, defaults),
            None => Ok(Vec::new()),
        }
    }

    /// Load-time hook for a component that belongs to `category_id`.
    ///
    /// Resolves the descriptor and attaches its default customs to `owner`
    /// without replacing customs the component already has. Returns the
    /// number of customs attached.
    pub fn on_load(
        &mut self,
        category_id: &str,
        owner: &str,
        registry: &mut CustomRegistry,
        factories: &CustomFactories,
    ) -> Result<usize> {
        let defaults = self.defaults(category_id, owner, factories)?;
        if defaults.is_empty() {
            return Ok(0);
        }

        tracing::debug!(category = category_id, owner, "Applying category defaults");
        Ok(registry.set_all(owner, defaults, false))
    }
}
