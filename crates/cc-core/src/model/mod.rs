//! Host-side data the core operates on.

mod component;
mod item;
mod mech;

pub use component::{ComponentDef, DataManager};
pub use item::{Change, MountedItem};
pub use mech::{Loadout, MechDef};
