//! Customs: typed extension entries attached to component definitions.
//!
//! A custom is any type implementing [`Custom`]. Its [`CustomKind`] carries
//! the static identity metadata the [`CustomRegistry`] deduplicates on:
//!
//! - entries are compared by group when the kind declares one, by name
//!   otherwise;
//! - kinds that allow arrays may hold several entries of one identity,
//!   distinguished by [`Custom::replace_id`].

mod category;
mod color;
mod factory;
mod flags;
mod registry;

use std::any::Any;
use std::fmt;

pub use category::Category;
pub use color::{RgbColor, UiColor};
pub use factory::{CustomFactories, from_value};
pub use flags::Flags;
pub use registry::CustomRegistry;

/// Static identity metadata of a custom type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomKind {
    /// Name used in raw values and logs
    pub name: &'static str,
    /// Optional group; customs of one group replace each other
    pub group: Option<&'static str>,
    /// Whether several entries may coexist, keyed by replace id
    pub allow_array: bool,
}

impl CustomKind {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            group: None,
            allow_array: false,
        }
    }

    pub const fn in_group(self, group: &'static str) -> Self {
        Self {
            group: Some(group),
            ..self
        }
    }

    pub const fn array(self) -> Self {
        Self {
            allow_array: true,
            ..self
        }
    }

    /// The identity entries are deduplicated on.
    pub fn identity(&self) -> Identity {
        match self.group {
            Some(group) if !group.is_empty() => Identity::Group(group),
            _ => Identity::Name(self.name),
        }
    }
}

/// Dedup identity of a custom: its group if it has one, its name otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    Name(&'static str),
    Group(&'static str),
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Name(name) => write!(f, "{}", name),
            Identity::Group(group) => write!(f, "group:{}", group),
        }
    }
}

/// A typed extension entry.
pub trait Custom: Any + fmt::Debug {
    /// Static identity metadata.
    fn kind(&self) -> &'static CustomKind;

    /// Secondary dedup key for kinds that allow arrays.
    fn replace_id(&self) -> Option<&str> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}
