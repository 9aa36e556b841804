//! Rules engine for Custom Components
//!
//! Independently authored extensions ("customs") attach to component
//! definitions and enforce equip-time rules without the definitions knowing
//! about them. This crate provides:
//!
//! - **Custom registry**: typed entries per component with identity-based
//!   dedup and replacement
//! - **Factories**: construction of customs from raw extension values at load
//! - **Constraint engine**: per-category checkpoints for capacity limits, tag
//!   exclusivity and default backfill
//! - **Autofixer**: fault-isolated batch repair of mech definitions
//! - **Session**: one context object owning all of the above
//!
//! # Architecture
//!
//! ```text
//!                     Session
//!                        |
//!     +----------+-------+------+-----------+
//!     |          |              |           |
//! registry   factories   constraint engine  autofixer
//!     |                         |
//! identifier                 cc-meta (settings, descriptors)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cc_core::{ComponentDef, Session};
//! use cc_meta::Settings;
//!
//! fn example(values: &serde_json::Map<String, serde_json::Value>) -> cc_core::Result<()> {
//!     let mut session = Session::new(Settings::default());
//!     session.load_component(ComponentDef::new("Gear_JumpJet", "Jump Jet"), values)?;
//!     Ok(())
//! }
//! ```

pub mod autofix;
pub mod category;
pub mod customs;
pub mod error;
pub mod identifier;
pub mod logging;
pub mod model;
pub mod salvage;
pub mod session;

pub use autofix::{AutoFixer, FixContext, FixFailure, FixPass, FixReport, FixScope, PassReport, SaveState};
pub use category::{CategoryController, ConstraintEngine, Rejection};
pub use customs::{
    Category, Custom, CustomFactories, CustomKind, CustomRegistry, Flags, Identity, RgbColor,
    UiColor,
};
pub use error::{Error, Result};
pub use identifier::{Description, Identifiable};
pub use model::{Change, ComponentDef, DataManager, Loadout, MechDef, MountedItem};
pub use session::Session;
