//! Reports produced by autofixer runs

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A pass that failed for one mech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixFailure {
    /// Id of the mech the pass failed on
    pub mech: String,
    /// The error message
    pub message: String,
}

/// Outcome of one pass over a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    /// Name of the pass
    pub name: String,
    /// Ids of mechs the pass modified
    pub changed: Vec<String>,
    /// Mechs the pass failed on; their inventory was left untouched
    pub failures: Vec<FixFailure>,
}

impl PassReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            changed: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Report from a batch repair run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixReport {
    /// Whether the run was disabled by settings
    pub skipped: bool,
    /// Per-pass outcomes in execution order
    pub passes: Vec<PassReport>,
}

impl FixReport {
    /// Create a report for a run disabled by settings
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            passes: Vec::new(),
        }
    }

    /// The report of the pass called `name`
    pub fn pass(&self, name: &str) -> Option<&PassReport> {
        self.passes.iter().find(|p| p.name == name)
    }

    /// Ids of every mech changed by any pass
    pub fn changed(&self) -> BTreeSet<&str> {
        self.passes
            .iter()
            .flat_map(|p| p.changed.iter().map(String::as_str))
            .collect()
    }

    /// Every failure, tagged with its pass name
    pub fn failures(&self) -> impl Iterator<Item = (&str, &FixFailure)> {
        self.passes
            .iter()
            .flat_map(|p| p.failures.iter().map(move |f| (p.name.as_str(), f)))
    }

    /// Whether the run neither changed anything nor failed
    pub fn is_clean(&self) -> bool {
        self.passes
            .iter()
            .all(|p| p.changed.is_empty() && p.failures.is_empty())
    }
}
