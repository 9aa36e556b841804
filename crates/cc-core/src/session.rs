//! Session context
//!
//! A [`Session`] owns everything one game session needs: settings, the
//! custom registry and factories, the category table, the component catalog
//! and the autofixer. Hosts create one per session and route load, equip
//! and repair calls through it.

use std::path::Path;

use cc_meta::Settings;
use serde_json::{Map, Value};

use crate::autofix::{AutoFixer, FixContext, FixReport, SaveState};
use crate::category::{CategoryController, ConstraintEngine};
use crate::customs::{Category, CustomFactories, CustomRegistry};
use crate::error::{Error, Result};
use crate::identifier::Identifiable;
use crate::model::{ComponentDef, DataManager, Loadout};
use crate::salvage;

/// All state of one session.
pub struct Session {
    settings: Settings,
    registry: CustomRegistry,
    factories: CustomFactories,
    categories: CategoryController,
    data: DataManager,
    fixer: AutoFixer,
}

impl Session {
    /// Create a session with built-in factories and passes.
    pub fn new(settings: Settings) -> Self {
        let categories = CategoryController::from_settings(&settings);
        let fixer = AutoFixer::from_settings(&settings);
        Self {
            settings,
            registry: CustomRegistry::new(),
            factories: CustomFactories::with_builtins(),
            categories,
            data: DataManager::new(),
            fixer,
        }
    }

    /// Create a session from a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = cc_meta::load_settings(path)?;
        Ok(Self::new(settings))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &CustomRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CustomRegistry {
        &mut self.registry
    }

    pub fn factories_mut(&mut self) -> &mut CustomFactories {
        &mut self.factories
    }

    pub fn categories(&self) -> &CategoryController {
        &self.categories
    }

    pub fn data(&self) -> &DataManager {
        &self.data
    }

    pub fn fixer_mut(&mut self) -> &mut AutoFixer {
        &mut self.fixer
    }

    /// Add a component definition and attach customs built from `values`.
    ///
    /// Customs from `values` replace existing entries. Every attached
    /// [`Category`] then applies its category defaults without replacing.
    /// Returns the number of customs attached.
    ///
    /// Every custom is built before anything is stored, so a failed load
    /// leaves the catalog and the registry as they were.
    pub fn load_component(&mut self, def: ComponentDef, values: &Map<String, Value>) -> Result<usize> {
        let Some(key) = def.identifier().map(str::to_string) else {
            return Err(Error::MissingIdentifier {
                what: format!("component definition '{}'", def.description.name),
            });
        };

        tracing::debug!(component = %key, customs = values.len(), "Loading component");
        let customs = self.factories.build(&key, values)?;

        let mut category_ids: Vec<String> = self
            .registry
            .get::<Category>(&key)
            .map(|c| c.category_id.clone())
            .collect();
        for custom in &customs {
            if let Some(category) = custom.as_any().downcast_ref::<Category>()
                && !category_ids.contains(&category.category_id)
            {
                category_ids.push(category.category_id.clone());
            }
        }

        let mut defaults = Vec::with_capacity(category_ids.len());
        for category_id in &category_ids {
            defaults.push(self.categories.defaults(category_id, &key, &self.factories)?);
        }

        self.data.add(def);
        let mut attached = self.registry.set_all(&key, customs, true);
        for customs in defaults {
            attached += self.registry.set_all(&key, customs, false);
        }

        Ok(attached)
    }

    /// Drop every custom and definition before the host reloads its data.
    ///
    /// Category descriptors are kept.
    pub fn on_data_reload(&mut self) {
        tracing::debug!("Data reload, clearing registry and catalog");
        self.registry.clear();
        self.data.clear();
    }

    /// Constraint engine over this session's state.
    pub fn engine(&self) -> ConstraintEngine<'_> {
        ConstraintEngine::new(&self.registry, &self.categories, &self.data)
            .with_description_color(&self.settings.category_description_color)
    }

    /// Context handed to repair passes.
    pub fn fix_context(&self) -> FixContext<'_> {
        FixContext::new(&self.registry, &self.categories, &self.data)
    }

    /// Repair a batch of mech definitions.
    pub fn fix_mechs<L: Loadout>(&self, batch: &mut [L]) -> FixReport {
        self.fixer.run(batch, &self.fix_context())
    }

    /// Repair a batch of mechs loaded from a save game.
    pub fn fix_saved_mechs<L: Loadout>(&self, batch: &mut [L], state: &SaveState) -> FixReport {
        self.fixer
            .run_save(batch, &self.fix_context().with_state(state))
    }

    /// Description text of a component with its category names added.
    pub fn adjust_description(&self, component_id: &str, text: &str) -> String {
        let engine = self.engine();
        engine
            .categories_of(component_id)
            .into_iter()
            .fold(text.to_string(), |text, category| {
                engine.adjust_description(category, &text)
            })
    }

    /// Drop entries that may not be salvaged.
    pub fn filter_salvage<T: Identifiable>(&self, salvage: &mut Vec<T>) {
        salvage::filter_salvage(&self.registry, salvage);
    }
}
