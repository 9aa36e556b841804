//! Session settings
//!
//! # Example TOML
//!
//! ```toml
//! run_autofixer = true
//! fix_save_game_mech = false
//! category_description_color = "#5ed4ff"
//! log_level = "debug"
//!
//! [[categories]]
//! name = "Jump"
//! max_equiped = 2
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::CategoryDescriptor;

/// Settings for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master switch for batch repair
    #[serde(default = "default_true")]
    pub run_autofixer: bool,
    /// Additional switch for repairing mechs from a save game
    #[serde(default = "default_true")]
    pub fix_save_game_mech: bool,
    /// Color used for the category tag block in descriptions
    #[serde(default = "default_color")]
    pub category_description_color: String,
    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Preconfigured category descriptors
    #[serde(default)]
    pub categories: Vec<CategoryDescriptor>,
}

fn default_true() -> bool {
    true
}

/// Color of the category tag block when settings do not name one.
pub const DEFAULT_DESCRIPTION_COLOR: &str = "#5ed4ff";

fn default_color() -> String {
    DEFAULT_DESCRIPTION_COLOR.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            run_autofixer: true,
            fix_save_game_mech: true,
            category_description_color: default_color(),
            log_level: default_log_level(),
            categories: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that category names are present and unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(Error::EmptyCategoryName);
            }
            if !seen.insert(category.name.as_str()) {
                return Err(Error::DuplicateCategory {
                    name: category.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look up a preconfigured category by name.
    pub fn category(&self, name: &str) -> Option<&CategoryDescriptor> {
        self.categories.iter().find(|c| c.name == name)
    }
}
