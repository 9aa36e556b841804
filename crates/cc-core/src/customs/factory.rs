//! Construction of customs from raw extension values
//!
//! The host hands over the raw values attached to a definition as a JSON
//! object keyed by custom name:
//!
//! ```json
//! {
//!   "Category": [{"category_id": "Jump"}, {"category_id": "Heat"}],
//!   "Flags": {"flags": ["default"]}
//! }
//! ```
//!
//! Each registered factory picks up its own name. Arrays are only accepted
//! for kinds that allow them.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{Category, Custom, CustomRegistry, Flags, RgbColor, UiColor};
use crate::error::{Error, Result};

type Constructor = Box<dyn Fn(&str, &Value) -> Result<Box<dyn Custom>>>;

struct Factory {
    name: String,
    allow_array: bool,
    construct: Constructor,
}

/// Named constructors for customs, in registration order.
pub struct CustomFactories {
    factories: Vec<Factory>,
}

impl CustomFactories {
    /// Create an empty set of factories.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Factories for the built-in customs.
    pub fn with_builtins() -> Self {
        let mut factories = Self::new();
        let builtins: [(&str, bool, fn(&str, &Value) -> Result<Box<dyn Custom>>); 4] = [
            ("Category", true, build_category),
            ("Flags", false, build_flags),
            ("Color", false, build_ui_color),
            ("RGBColor", false, build_rgb_color),
        ];
        for (name, allow_array, construct) in builtins {
            factories.factories.push(Factory {
                name: name.to_string(),
                allow_array,
                construct: Box::new(construct),
            });
        }
        factories
    }

    /// Register a factory for `name`.
    ///
    /// The constructor receives the owning key and one raw value.
    pub fn register<F>(&mut self, name: impl Into<String>, allow_array: bool, construct: F) -> Result<()>
    where
        F: Fn(&str, &Value) -> Result<Box<dyn Custom>> + 'static,
    {
        let name = name.into();
        if self.contains(&name) {
            return Err(Error::DuplicateFactory { name });
        }
        self.factories.push(Factory {
            name,
            allow_array,
            construct: Box::new(construct),
        });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.iter().any(|f| f.name == name)
    }

    /// Factory names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|f| f.name.as_str()).collect()
    }

    /// Construct the customs named in `values` without attaching them.
    ///
    /// Customs come out in factory registration order.
    ///
    /// # Errors
    ///
    /// Fails on the first value that does not construct.
    pub fn build(&self, key: &str, values: &Map<String, Value>) -> Result<Vec<Box<dyn Custom>>> {
        let mut customs = Vec::new();

        for factory in &self.factories {
            let Some(value) = values.get(&factory.name) else {
                continue;
            };

            let items: Vec<&Value> = match value {
                Value::Array(items) if factory.allow_array => items.iter().collect(),
                Value::Array(_) => {
                    return Err(Error::ArrayNotAllowed {
                        name: factory.name.clone(),
                    });
                }
                single => vec![single],
            };

            for item in items {
                customs.push((factory.construct)(key, item)?);
            }
        }

        for name in values.keys() {
            if !self.contains(name) {
                tracing::debug!(key, custom = %name, "No factory for custom");
            }
        }

        Ok(customs)
    }

    /// Build customs from `values` and attach them to `key`.
    ///
    /// Customs rejected by the registry (identity already present and
    /// `replace` false) are skipped. Returns the number attached.
    ///
    /// # Errors
    ///
    /// Fails when any value does not construct; the registry is left
    /// untouched in that case.
    pub fn process(
        &self,
        registry: &mut CustomRegistry,
        key: &str,
        values: &Map<String, Value>,
        replace: bool,
    ) -> Result<usize> {
        let customs = self.build(key, values)?;
        Ok(registry.set_all(key, customs, replace))
    }
}

impl Default for CustomFactories {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn build_category(owner: &str, value: &Value) -> Result<Box<dyn Custom>> {
    Ok(Box::new(Category::from_value(owner, value)?))
}

fn build_flags(_: &str, value: &Value) -> Result<Box<dyn Custom>> {
    Ok(Box::new(Flags::from_value(value)?))
}

fn build_ui_color(_: &str, value: &Value) -> Result<Box<dyn Custom>> {
    Ok(Box::new(UiColor::from_value(value)?))
}

fn build_rgb_color(_: &str, value: &Value) -> Result<Box<dyn Custom>> {
    Ok(Box::new(RgbColor::from_value(value)?))
}

/// Deserialize the raw values of custom `name`.
pub fn from_value<T: DeserializeOwned>(name: &str, value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|source| Error::InvalidCustom {
        name: name.to_string(),
        source,
    })
}
