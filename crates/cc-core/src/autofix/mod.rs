//! Fault-isolated batch repair of mech definitions
//!
//! An [`AutoFixer`] holds one ordered list of [`FixPass`]es. The general run
//! executes the [`FixScope::General`] passes, the save-game run executes all
//! of them, both in registration order. Each pass runs over every mech of
//! the batch before the next pass starts.
//!
//! A pass that fails for one mech is recorded in the [`FixReport`]; the
//! mech's inventory is restored to what it was before that pass, and the
//! run carries on with the next mech and the next pass.

mod builtins;
mod report;

use std::collections::BTreeSet;
use std::fmt;

use cc_meta::Settings;

pub use builtins::{re_add_fixed, remove_empty_refs};
pub use report::{FixFailure, FixReport, PassReport};

use crate::Result;
use crate::category::{CategoryController, ConstraintEngine};
use crate::customs::CustomRegistry;
use crate::identifier::{self, Identifiable};
use crate::model::{DataManager, Loadout};

/// Which runs a pass takes part in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixScope {
    /// Both the general and the save-game run
    General,
    /// Only the save-game run
    SaveGameOnly,
}

/// Company state available to save-game passes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveState {
    pub company_tags: BTreeSet<String>,
}

impl SaveState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.company_tags.insert(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.company_tags.contains(tag)
    }
}

/// Everything a pass may read while repairing a mech.
#[derive(Debug, Clone, Copy)]
pub struct FixContext<'a> {
    pub registry: &'a CustomRegistry,
    pub categories: &'a CategoryController,
    pub data: &'a DataManager,
    /// Present for save-game runs only
    pub state: Option<&'a SaveState>,
}

impl<'a> FixContext<'a> {
    pub fn new(
        registry: &'a CustomRegistry,
        categories: &'a CategoryController,
        data: &'a DataManager,
    ) -> Self {
        Self {
            registry,
            categories,
            data,
            state: None,
        }
    }

    pub fn with_state(mut self, state: &'a SaveState) -> Self {
        self.state = Some(state);
        self
    }

    /// Constraint engine over the same registry and catalog.
    pub fn engine(&self) -> ConstraintEngine<'a> {
        ConstraintEngine::new(self.registry, self.categories, self.data)
    }
}

type PassFn = Box<dyn Fn(&mut dyn Loadout, &FixContext<'_>) -> Result<bool>>;

/// A named repair step applied to one mech at a time.
///
/// The callable returns whether it modified the mech.
pub struct FixPass {
    name: String,
    scope: FixScope,
    run: PassFn,
}

impl FixPass {
    pub fn new<F>(name: impl Into<String>, scope: FixScope, run: F) -> Self
    where
        F: Fn(&mut dyn Loadout, &FixContext<'_>) -> Result<bool> + 'static,
    {
        Self {
            name: name.into(),
            scope,
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> FixScope {
        self.scope
    }
}

impl fmt::Debug for FixPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixPass")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Ordered pipeline of repair passes.
#[derive(Debug)]
pub struct AutoFixer {
    passes: Vec<FixPass>,
    enabled: bool,
    save_enabled: bool,
}

impl AutoFixer {
    /// Create an enabled fixer without passes.
    pub fn new() -> Self {
        Self {
            passes: Vec::new(),
            enabled: true,
            save_enabled: true,
        }
    }

    /// Create a fixer with the built-in passes.
    pub fn with_builtins() -> Self {
        let mut fixer = Self::new();
        fixer.register_fixer("remove_empty_refs", remove_empty_refs);
        fixer.register_fixer("re_add_fixed", re_add_fixed);
        fixer
    }

    /// Built-in passes, enabled according to `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut fixer = Self::with_builtins();
        fixer.set_enabled(settings.run_autofixer);
        fixer.set_save_enabled(settings.fix_save_game_mech);
        fixer
    }

    /// Register a pass for both the general and the save-game run.
    pub fn register_fixer<F>(&mut self, name: impl Into<String>, run: F)
    where
        F: Fn(&mut dyn Loadout, &FixContext<'_>) -> Result<bool> + 'static,
    {
        self.passes.push(FixPass::new(name, FixScope::General, run));
    }

    /// Register a pass for the save-game run only.
    pub fn register_save_fixer<F>(&mut self, name: impl Into<String>, run: F)
    where
        F: Fn(&mut dyn Loadout, &FixContext<'_>) -> Result<bool> + 'static,
    {
        self.passes
            .push(FixPass::new(name, FixScope::SaveGameOnly, run));
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_save_enabled(&mut self, enabled: bool) {
        self.save_enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_save_enabled(&self) -> bool {
        self.enabled && self.save_enabled
    }

    /// Registered passes in execution order.
    pub fn passes(&self) -> &[FixPass] {
        &self.passes
    }

    /// Run the general passes over `batch`.
    pub fn run<L: Loadout>(&self, batch: &mut [L], ctx: &FixContext<'_>) -> FixReport {
        if !self.is_enabled() {
            tracing::debug!("Autofixer disabled, skipping");
            return FixReport::skipped();
        }
        self.execute(batch, ctx, |pass| pass.scope == FixScope::General)
    }

    /// Run every pass over mechs loaded from a save game.
    pub fn run_save<L: Loadout>(&self, batch: &mut [L], ctx: &FixContext<'_>) -> FixReport {
        if !self.is_save_enabled() {
            tracing::debug!("Save game autofixer disabled, skipping");
            return FixReport::skipped();
        }
        self.execute(batch, ctx, |_| true)
    }

    fn execute<L, P>(&self, batch: &mut [L], ctx: &FixContext<'_>, include: P) -> FixReport
    where
        L: Loadout,
        P: Fn(&FixPass) -> bool,
    {
        let mut report = FixReport::default();

        for pass in self.passes.iter().filter(|p| include(p)) {
            tracing::debug!(pass = %pass.name, mechs = batch.len(), "Running fix pass");
            let mut outcome = PassReport::new(&pass.name);

            for mech in batch.iter_mut() {
                let id = identifier::identifier(Some(&*mech as &dyn Identifiable));
                let snapshot = mech.inventory().to_vec();
                let target: &mut dyn Loadout = &mut *mech;

                match (pass.run)(target, ctx) {
                    Ok(true) => outcome.changed.push(id),
                    Ok(false) => {}
                    Err(e) => {
                        tracing::error!(pass = %pass.name, mech = %id, error = %e, "Fix pass failed");
                        mech.set_inventory(snapshot);
                        outcome.failures.push(FixFailure {
                            mech: id,
                            message: e.to_string(),
                        });
                    }
                }
            }

            report.passes.push(outcome);
        }

        report
    }
}

impl Default for AutoFixer {
    fn default() -> Self {
        Self::with_builtins()
    }
}
