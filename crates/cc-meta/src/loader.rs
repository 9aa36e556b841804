//! Loading settings from disk.

use std::fs;
use std::path::Path;

use crate::config::Settings;
use crate::error::{Error, Result};

/// Largest settings file accepted, in bytes.
pub const MAX_SETTINGS_SIZE: u64 = 1024 * 1024;

/// Load and validate settings from a TOML file.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`] when the file does not exist,
/// [`Error::ConfigTooLarge`] above [`MAX_SETTINGS_SIZE`] and
/// [`Error::InvalidConfig`] when it does not parse or validate.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let size = fs::metadata(path)?.len();
    if size > MAX_SETTINGS_SIZE {
        return Err(Error::ConfigTooLarge {
            path: path.to_path_buf(),
            size,
            max: MAX_SETTINGS_SIZE,
        });
    }

    let content = fs::read_to_string(path)?;
    let settings = Settings::from_toml_str(&content).map_err(|e| Error::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!(
        ?path,
        categories = settings.categories.len(),
        "Loaded settings"
    );

    Ok(settings)
}
