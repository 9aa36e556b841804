//! Settings documents and files for tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Settings for the catalog built by [`crate::catalog::session`]:
///
/// - `Jump`: at most two per mech, swapped from any location
/// - `Engine`: one per location, backfilled with `Gear_Engine_Empty` in the
///   center torso
/// - `Cockpit`: one per location, members can not be removed
/// - `Armor`: one tag per mech
pub const CATALOG_SETTINGS: &str = r##"
run_autofixer = true
fix_save_game_mech = true
category_description_color = "#5ed4ff"

[[categories]]
name = "Jump"
display_name = "Jump Jets"
max_equiped = 2
replace_any_location = true
add_category_to_description = true

[[categories]]
name = "Engine"
max_equiped_per_location = 1

[categories.default_item]
component_id = "Gear_Engine_Empty"
location = "CenterTorso"

[[categories]]
name = "Cockpit"
max_equiped_per_location = 1

[categories.defaults.Flags]
flags = ["no_remove", "not_salvagable"]

[[categories]]
name = "Armor"
allow_mix_tags = false
"##;

/// A settings file in its own temporary directory.
pub struct SettingsFile {
    temp_dir: TempDir,
    path: PathBuf,
}

impl SettingsFile {
    /// Write `content` to `settings.toml` in a new temporary directory.
    pub fn new(content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, content).unwrap();
        Self { temp_dir, path }
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the settings file.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}
