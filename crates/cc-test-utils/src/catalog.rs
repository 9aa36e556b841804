//! A session preloaded with a small component catalog.

use cc_core::{ComponentDef, Session};
use cc_meta::Settings;
use serde_json::{Value, json};

use crate::settings::CATALOG_SETTINGS;

/// Load one component with raw custom values given as a JSON object.
pub fn load(session: &mut Session, id: &str, values: Value) -> usize {
    let values = values.as_object().cloned().unwrap_or_default();
    session
        .load_component(ComponentDef::new(id, id), &values)
        .unwrap()
}

/// Load the catalog components into `session`.
pub fn load_catalog(session: &mut Session) {
    load(session, "Gear_JumpJet", json!({"Category": {"category_id": "Jump"}}));
    load(session, "Gear_JumpJet_Heavy", json!({"Category": {"category_id": "Jump"}}));
    load(
        session,
        "Gear_Engine_Empty",
        json!({
            "Category": {"category_id": "Engine"},
            "Flags": {"flags": ["default"]}
        }),
    );
    load(session, "Gear_Engine_300", json!({"Category": {"category_id": "Engine"}}));
    load(session, "Gear_Cockpit", json!({"Category": {"category_id": "Cockpit"}}));
    load(session, "Armor_Ferro", json!({"Category": {"category_id": "Armor", "tag": "ferro"}}));
    load(session, "Armor_Standard", json!({"Category": {"category_id": "Armor", "tag": "standard"}}));
    load(session, "Weapon_AC20", json!({"RGBColor": {"color": "#ff8800"}}));
}

/// Settings used by [`session`].
pub fn settings() -> Settings {
    Settings::from_toml_str(CATALOG_SETTINGS).unwrap()
}

/// A session with the catalog settings and components loaded.
pub fn session() -> Session {
    let mut session = Session::new(settings());
    load_catalog(&mut session);
    session
}
