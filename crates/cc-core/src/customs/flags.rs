use std::any::Any;
use std::collections::BTreeSet;

use serde::Deserialize;

use super::{Custom, CustomKind};

static FLAGS: CustomKind = CustomKind::new("Flags");

/// Free-form component flags.
///
/// Known flags: `default` (backfill item), `no_remove` and `not_salvagable`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Flags {
    #[serde(default, alias = "Flags")]
    pub flags: BTreeSet<String>,
}

impl Flags {
    pub const DEFAULT: &'static str = "default";
    pub const NO_REMOVE: &'static str = "no_remove";
    pub const NOT_SALVAGABLE: &'static str = "not_salvagable";

    pub fn new<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_value(value: &serde_json::Value) -> crate::Result<Self> {
        super::from_value(FLAGS.name, value)
    }

    pub fn has(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_default(&self) -> bool {
        self.has(Self::DEFAULT)
    }

    pub fn no_remove(&self) -> bool {
        self.has(Self::NO_REMOVE)
    }

    pub fn not_salvagable(&self) -> bool {
        self.has(Self::NOT_SALVAGABLE)
    }
}

impl Custom for Flags {
    fn kind(&self) -> &'static CustomKind {
        &FLAGS
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_flags() {
        let flags = Flags::new([Flags::DEFAULT, Flags::NOT_SALVAGABLE]);
        assert!(flags.is_default());
        assert!(flags.not_salvagable());
        assert!(!flags.no_remove());
    }

    #[test]
    fn test_from_value() {
        let flags = Flags::from_value(&json!({"flags": ["no_remove", "default"]})).unwrap();
        assert!(flags.no_remove());
        assert!(flags.is_default());
    }

    #[test]
    fn test_from_value_rejects_wrong_shape() {
        assert!(Flags::from_value(&json!({"flags": "default"})).is_err());
    }
}
