//! Declarative schema types loaded from settings.

mod category;

pub use category::{CategoryDescriptor, CategoryMessages, DefaultItem, render_template};
