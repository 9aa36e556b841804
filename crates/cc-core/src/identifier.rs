//! Stable keys for registry lookups
//!
//! Every object customs can attach to exposes its key through
//! [`Identifiable`]. Component definitions and mounted items answer directly;
//! anything else that carries a [`Description`] only needs to expose it.

use serde::{Deserialize, Serialize};

/// Descriptive data shared by definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// Stable id, used as the registry key
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Long description text
    #[serde(default)]
    pub details: String,
}

impl Description {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            details: String::new(),
        }
    }
}

/// Capability for objects that have a stable registry key.
pub trait Identifiable {
    /// The key for this object.
    ///
    /// Types with a direct id override this; the default reads the id from
    /// [`Identifiable::description`].
    fn identifier(&self) -> Option<&str> {
        self.description()
            .map(|d| d.id.as_str())
            .filter(|id| !id.is_empty())
    }

    /// Accessor for types that carry a [`Description`].
    fn description(&self) -> Option<&Description> {
        None
    }
}

impl Identifiable for Description {
    fn identifier(&self) -> Option<&str> {
        Some(self.id.as_str()).filter(|id| !id.is_empty())
    }

    fn description(&self) -> Option<&Description> {
        Some(self)
    }
}

/// Resolve the registry key for `target`.
///
/// A missing target or a target without an identifier is logged and yields
/// an empty string.
pub fn identifier(target: Option<&dyn Identifiable>) -> String {
    let Some(target) = target else {
        tracing::error!("Requested identifier for a missing target");
        return String::new();
    };

    match target.identifier() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            tracing::error!("Requested identifier for a target without one");
            String::new()
        }
    }
}
