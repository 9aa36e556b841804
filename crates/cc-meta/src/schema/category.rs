//! Category descriptor schema, declared in settings as `[[categories]]`.
//!
//! A category is a classification shared by many components (for example
//! every jump jet belongs to `Jump`). The descriptor carries the equip
//! policy for all of them.
//!
//! # Example TOML
//!
//! ```toml
//! [[categories]]
//! name = "Jump"
//! display_name = "Jump Jets"
//! max_equiped = 2
//! auto_replace = true
//!
//! [categories.default_item]
//! component_id = "Gear_JumpJet_Empty"
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::location::ChassisLocation;

/// Equip policy shared by every component of one category.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryDescriptor {
    /// Category id, the key components refer to
    pub name: String,
    /// Label shown to the player; falls back to `name`
    #[serde(default)]
    pub display_name: Option<String>,
    /// Mech-wide limit, `<= 0` means unlimited
    #[serde(default = "unlimited")]
    pub max_equiped: i32,
    /// Per-location limit, `<= 0` means unlimited
    #[serde(default = "unlimited")]
    pub max_equiped_per_location: i32,
    /// Whether a full category swaps out an existing item instead of refusing
    #[serde(default = "default_true")]
    pub auto_replace: bool,
    /// Whether the swap may take an item from another location
    #[serde(default)]
    pub replace_any_location: bool,
    /// Whether items with different tags may be mounted together
    #[serde(default = "default_true")]
    pub allow_mix_tags: bool,
    /// Whether the display name is added to component descriptions
    #[serde(default)]
    pub add_category_to_description: bool,
    /// Rejection message templates
    #[serde(default)]
    pub messages: CategoryMessages,
    /// Raw custom values attached to every member component on load
    #[serde(default)]
    pub defaults: Option<Map<String, Value>>,
    /// Item re-inserted whenever the category would be left empty
    #[serde(default)]
    pub default_item: Option<DefaultItem>,
}

fn unlimited() -> i32 {
    -1
}

fn default_true() -> bool {
    true
}

impl CategoryDescriptor {
    /// Create a descriptor with default policy: unlimited, mixable, auto replace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            max_equiped: unlimited(),
            max_equiped_per_location: unlimited(),
            auto_replace: true,
            replace_any_location: false,
            allow_mix_tags: true,
            add_category_to_description: false,
            messages: CategoryMessages::default(),
            defaults: None,
            default_item: None,
        }
    }

    /// The label used in messages and descriptions.
    pub fn display_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }

    /// Mech-wide limit, if any.
    pub fn global_limit(&self) -> Option<usize> {
        usize::try_from(self.max_equiped).ok().filter(|n| *n > 0)
    }

    /// Per-location limit, if any.
    pub fn location_limit(&self) -> Option<usize> {
        usize::try_from(self.max_equiped_per_location)
            .ok()
            .filter(|n| *n > 0)
    }

    /// Whether any capacity limit is configured.
    pub fn is_limited(&self) -> bool {
        self.global_limit().is_some() || self.location_limit().is_some()
    }

    /// Message for a full mech-wide limit; `count` is the number mounted.
    pub fn maximum_reached(&self, count: usize) -> String {
        if self.max_equiped > 1 {
            render_template(
                &self.messages.add_maximum_reached,
                &[self.display_name(), &count.to_string()],
            )
        } else {
            render_template(&self.messages.add_already_equiped, &[self.display_name()])
        }
    }

    /// Message for a full location; `count` is the number mounted there.
    pub fn maximum_location_reached(&self, count: usize, location: ChassisLocation) -> String {
        if self.max_equiped_per_location > 1 {
            render_template(
                &self.messages.add_maximum_location_reached,
                &[
                    self.display_name(),
                    &count.to_string(),
                    location.display_name(),
                ],
            )
        } else {
            render_template(
                &self.messages.add_already_equiped_location,
                &[self.display_name(), location.display_name()],
            )
        }
    }

    /// Message for mixing items with different tags.
    pub fn mixed(&self) -> String {
        render_template(&self.messages.add_mixed, &[self.display_name()])
    }
}

/// Templates for rejection messages.
///
/// Placeholders are positional: `{0}` is the display name, `{1}` the count
/// (or the location for the singular location message) and `{2}` the
/// location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CategoryMessages {
    pub add_already_equiped: String,
    pub add_maximum_reached: String,
    pub add_already_equiped_location: String,
    pub add_maximum_location_reached: String,
    pub add_mixed: String,
}

impl Default for CategoryMessages {
    fn default() -> Self {
        Self {
            add_already_equiped: "{0} already installed on mech".to_string(),
            add_maximum_reached: "Mech already has {1} of {0} installed".to_string(),
            add_already_equiped_location: "{0} already installed in {1}".to_string(),
            add_maximum_location_reached: "Mech already has {1} of {0} installed in {2}"
                .to_string(),
            add_mixed: "Mech can only use one type of {0}".to_string(),
        }
    }
}

/// Item mounted to backfill an empty category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DefaultItem {
    /// Component definition id to mount
    pub component_id: String,
    /// Fixed mount location; the vacated location is used when absent
    #[serde(default)]
    pub location: Option<ChassisLocation>,
}

/// Substitute `{N}` placeholders with positional arguments.
///
/// Placeholders without a matching argument are left as they are.
pub fn render_template(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (index, value) in args.iter().enumerate() {
        let pattern = format!("{{{}}}", index);
        result = result.replace(&pattern, value);
    }
    result
}
