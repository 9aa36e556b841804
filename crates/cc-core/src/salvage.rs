//! Salvage filtering
//!
//! Components flagged `not_salvagable` never show up in post-battle salvage.

use crate::customs::{CustomRegistry, Flags};
use crate::identifier::Identifiable;

/// Whether `component_id` may be offered as salvage.
pub fn is_salvagable(registry: &CustomRegistry, component_id: &str) -> bool {
    !registry
        .get_first::<Flags>(component_id)
        .is_some_and(Flags::not_salvagable)
}

/// Drop entries that may not be salvaged, keeping the order of the rest.
pub fn filter_salvage<T: Identifiable>(registry: &CustomRegistry, salvage: &mut Vec<T>) {
    salvage.retain(|entry| {
        let key = CustomRegistry::identifier(Some(entry));
        let keep = is_salvagable(registry, &key);
        if !keep {
            tracing::debug!(component = %key, "Removed from salvage");
        }
        keep
    });
}
