use std::any::Any;

use serde::Deserialize;

use super::{Custom, CustomKind};

static CATEGORY: CustomKind = CustomKind::new("Category").array();

/// Membership of a component in a category.
///
/// A component may belong to several categories; the category id is the
/// replace id, so each category appears at most once per component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub category_id: String,
    /// Tag for mix checks; the owning component id when unset
    pub tag: Option<String>,
    /// Id of the component this entry is attached to
    pub owner: String,
}

#[derive(Debug, Deserialize)]
struct CategoryValues {
    #[serde(alias = "CategoryID")]
    category_id: String,
    #[serde(default, alias = "Tag")]
    tag: Option<String>,
}

impl Category {
    pub fn new(category_id: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            tag: None,
            owner: owner.into(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Build from raw values such as `{"category_id": "Jump", "tag": "light"}`.
    pub fn from_value(owner: &str, value: &serde_json::Value) -> crate::Result<Self> {
        let values: CategoryValues = super::from_value(CATEGORY.name, value)?;
        Ok(Self {
            category_id: values.category_id,
            tag: values.tag.filter(|t| !t.is_empty()),
            owner: owner.to_string(),
        })
    }

    pub fn tag(&self) -> &str {
        self.tag.as_deref().unwrap_or(&self.owner)
    }
}

impl Custom for Category {
    fn kind(&self) -> &'static CustomKind {
        &CATEGORY
    }

    fn replace_id(&self) -> Option<&str> {
        Some(&self.category_id)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
