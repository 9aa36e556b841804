//! Error types for cc-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Settings not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid settings at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Settings file too large: {path} is {size} bytes (max {max})")]
    ConfigTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Category declared more than once: {name}")]
    DuplicateCategory { name: String },

    #[error("Category with empty name")]
    EmptyCategoryName,

    #[error("Invalid chassis location: {location}")]
    InvalidLocation { location: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
