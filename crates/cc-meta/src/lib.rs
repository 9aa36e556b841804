//! Settings and schema types for Custom Components.
//!
//! This crate holds the declarative side of the system: the session
//! [`Settings`], the per-category [`CategoryDescriptor`] policy records and
//! the [`ChassisLocation`] slots items are mounted into. It knows nothing
//! about registries or equip transactions; `cc-core` builds on top of it.

pub mod config;
pub mod error;
pub mod loader;
pub mod location;
pub mod schema;

pub use config::{DEFAULT_DESCRIPTION_COLOR, Settings};
pub use error::{Error, Result};
pub use loader::{MAX_SETTINGS_SIZE, load_settings};
pub use location::ChassisLocation;
pub use schema::{CategoryDescriptor, CategoryMessages, DefaultItem, render_template};
