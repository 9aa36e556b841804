//! Session Scenarios
//!
//! End-to-end flows through [`Session`]: loading definitions, equip
//! transactions against the constraint engine, batch repair, descriptions
//! and salvage. Every scenario starts from the shared test catalog.

use cc_core::{
    Category, Change, ComponentDef, Error, Flags, Loadout, MechDef, MountedItem, Rejection,
    RgbColor, SaveState, Session, UiColor,
};
use cc_meta::ChassisLocation::{self, *};
use cc_test_utils::catalog::{self, load};
use cc_test_utils::mechs::{atlas, count, ids, with_jets};
use cc_test_utils::settings::{CATALOG_SETTINGS, SettingsFile};
use serde_json::json;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Run the drop checkpoints, then commit and run the install hooks.
fn equip(
    session: &Session,
    mech: &mut MechDef,
    item: MountedItem,
    target: ChassisLocation,
) -> Result<Vec<Change>, Rejection> {
    let engine = session.engine();
    let mut changes = Vec::new();
    engine.validate_drop(&item, target, mech.inventory(), &mut changes)?;

    let installed = item.moved_to(target);
    let mut proposed = mech.inventory().to_vec();
    for change in &changes {
        change.apply(&mut proposed);
    }
    proposed.push(installed.clone());
    engine.post_validate_item(&installed, &proposed)?;

    mech.set_inventory(proposed);
    for category in engine.categories_of(&installed.component_id) {
        changes.extend(engine.on_installed(category, mech, &installed, None, Some(target)));
    }
    Ok(changes)
}

/// Move a mounted item and run the install hooks with both locations.
fn relocate(session: &Session, mech: &mut MechDef, item: &MountedItem, to: ChassisLocation) -> Vec<Change> {
    let engine = session.engine();
    let moved = item.moved_to(to);

    let mut inventory = mech.inventory().to_vec();
    Change::Remove(item.clone()).apply(&mut inventory);
    inventory.push(moved.clone());
    mech.set_inventory(inventory);

    let mut applied = Vec::new();
    for category in engine.categories_of(&moved.component_id) {
        applied.extend(engine.on_installed(category, mech, &moved, Some(item.location), Some(to)));
    }
    applied
}

// =============================================================================
// Scenario 1: Loading definitions
// =============================================================================

mod s1_loading {
    use super::*;
    use pretty_assertions::assert_eq;

    /// S1.1: A session loads from a settings file and attaches category defaults
    #[test]
    fn s1_1_load_from_settings_file() {
        let file = SettingsFile::new(CATALOG_SETTINGS);
        let mut session = Session::load(file.path()).unwrap();
        catalog::load_catalog(&mut session);

        assert_eq!(session.categories().len(), 4);
        assert!(session.registry().is::<Category>("Gear_Cockpit"));

        let flags = session.registry().get_first::<Flags>("Gear_Cockpit").unwrap();
        assert!(flags.no_remove());
        assert!(flags.not_salvagable());

        let color = session.registry().get_first::<RgbColor>("Weapon_AC20").unwrap();
        assert_eq!(color.rgb, [0xff, 0x88, 0x00]);
    }

    /// S1.2: A missing settings file is reported through the core error
    #[test]
    fn s1_2_missing_settings_file() {
        let file = SettingsFile::new("");
        let err = Session::load(&file.dir().join("absent.toml")).err().unwrap();
        assert!(matches!(err, Error::Meta(cc_meta::Error::ConfigNotFound { .. })));
    }

    /// S1.3: Reloading a component replaces customs of the same group
    #[test]
    fn s1_3_reload_replaces_color_group() {
        let mut session = catalog::session();
        load(&mut session, "Weapon_AC20", json!({"Color": {"palette": "weapon"}}));

        assert!(!session.registry().is::<RgbColor>("Weapon_AC20"));
        assert_eq!(
            session.registry().get_first::<UiColor>("Weapon_AC20").unwrap().palette,
            "weapon"
        );
        assert_eq!(session.registry().entries("Weapon_AC20").len(), 1);
    }

    /// S1.4: A component can belong to several categories
    #[test]
    fn s1_4_multiple_categories() {
        let mut session = catalog::session();
        load(
            &mut session,
            "Gear_JumpJet_Engine",
            json!({"Category": [{"category_id": "Jump"}, {"category_id": "Engine"}]}),
        );

        let engine = session.engine();
        let categories: Vec<_> = engine
            .categories_of("Gear_JumpJet_Engine")
            .into_iter()
            .map(|c| c.category_id.as_str())
            .collect();
        assert_eq!(categories, vec!["Jump", "Engine"]);
    }

    /// S1.5: Bad raw values fail the load
    #[test]
    fn s1_5_array_for_single_custom_fails() {
        let mut session = catalog::session();
        let values = json!({"Flags": [{"flags": ["default"]}]});
        let err = session
            .load_component(
                ComponentDef::new("Gear_Broken", "Broken"),
                values.as_object().unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::ArrayNotAllowed { .. }));
    }

    /// S1.6: A data reload clears customs and definitions
    #[test]
    fn s1_6_data_reload() {
        let mut session = catalog::session();
        session.on_data_reload();

        assert!(session.registry().is_empty());
        assert!(session.data().is_empty());
        assert_eq!(session.categories().len(), 4);
    }
}

// =============================================================================
// Scenario 2: Equip transactions
// =============================================================================

mod s2_equip {
    use super::*;
    use pretty_assertions::assert_eq;

    /// S2.1: A full jump category swaps out an existing jet
    #[test]
    fn s2_1_jump_swap_from_other_location() {
        let session = catalog::session();
        let mut mech = with_jets(atlas(), &[LeftLeg, RightLeg]);

        let changes = equip(
            &session,
            &mut mech,
            MountedItem::new("Gear_JumpJet_Heavy", CenterTorso),
            CenterTorso,
        )
        .unwrap();

        assert_eq!(
            changes,
            vec![Change::Remove(MountedItem::new("Gear_JumpJet", LeftLeg))]
        );
        assert_eq!(count(&mech, "Gear_JumpJet"), 1);
        assert_eq!(count(&mech, "Gear_JumpJet_Heavy"), 1);
        assert!(session.engine().validate_inventory(mech.inventory()).is_empty());
    }

    /// S2.2: Mixing armor tags is refused
    #[test]
    fn s2_2_armor_tags_do_not_mix() {
        let session = catalog::session();
        let mut mech = atlas().with_item(MountedItem::new("Armor_Ferro", CenterTorso));
        let before = mech.clone();

        let rejection = equip(
            &session,
            &mut mech,
            MountedItem::new("Armor_Standard", LeftTorso),
            LeftTorso,
        )
        .unwrap_err();

        assert!(matches!(rejection, Rejection::MixedTags { .. }));
        assert_eq!(rejection.to_string(), "Mech can only use one type of Armor");
        assert_eq!(mech, before);
    }

    /// S2.3: A locked cockpit can not be swapped
    #[test]
    fn s2_3_cockpit_is_locked() {
        let session = catalog::session();
        let mut mech = atlas();

        let rejection = equip(
            &session,
            &mut mech,
            MountedItem::new("Gear_Cockpit", Head),
            Head,
        )
        .unwrap_err();

        assert_eq!(rejection.message(), "Cockpit already installed in Head");
        assert_eq!(mech, atlas());
    }

    /// S2.4: Installing an engine pushes out the empty default
    #[test]
    fn s2_4_engine_replaces_default() {
        let session = catalog::session();
        let mut mech = MechDef::new("mechdef_test", "Test")
            .with_item(MountedItem::new("Gear_Engine_Empty", CenterTorso));

        let changes = equip(
            &session,
            &mut mech,
            MountedItem::new("Gear_Engine_300", CenterTorso),
            CenterTorso,
        )
        .unwrap();

        assert_eq!(
            changes,
            vec![Change::Remove(MountedItem::new("Gear_Engine_Empty", CenterTorso))]
        );
        assert_eq!(ids(&mech), vec!["Gear_Engine_300"]);
    }

    /// S2.5: Moving an engine out backfills the center torso, moving it back
    /// removes the backfill again
    #[test]
    fn s2_5_engine_move_round_trip() {
        let session = catalog::session();
        let mut mech = atlas();
        let engine_300 = MountedItem::new("Gear_Engine_300", CenterTorso);

        let applied = relocate(&session, &mut mech, &engine_300, LeftTorso);
        assert_eq!(
            applied,
            vec![Change::Add(MountedItem::new("Gear_Engine_Empty", CenterTorso))]
        );

        let applied = relocate(&session, &mut mech, &engine_300.moved_to(LeftTorso), CenterTorso);
        assert_eq!(
            applied,
            vec![Change::Remove(MountedItem::new("Gear_Engine_Empty", CenterTorso))]
        );
        assert_eq!(count(&mech, "Gear_Engine_Empty"), 0);
        assert_eq!(count(&mech, "Gear_Engine_300"), 1);
    }

    /// S2.6: Removing the engine queues the default and grabbing adds it
    #[test]
    fn s2_6_engine_removal_backfills() {
        let session = catalog::session();
        let engine = session.engine();
        let mut mech = atlas();
        let engine_300 = MountedItem::new("Gear_Engine_300", CenterTorso);
        let category = engine
            .category_of("Gear_Engine_300", "Engine")
            .unwrap();

        let queued = engine.validate_drop_on_remove(category, &engine_300, mech.inventory(), &[]);
        assert_eq!(
            queued,
            Some(Change::Add(MountedItem::new("Gear_Engine_Empty", CenterTorso)))
        );

        let mut inventory = mech.inventory().to_vec();
        Change::Remove(engine_300.clone()).apply(&mut inventory);
        mech.set_inventory(inventory);

        let added = engine.on_item_grabbed(category, &mut mech, CenterTorso);
        assert_eq!(added, Some(MountedItem::new("Gear_Engine_Empty", CenterTorso)));
        assert_eq!(count(&mech, "Gear_Engine_Empty"), 1);
    }
}

// =============================================================================
// Scenario 3: Batch repair
// =============================================================================

mod s3_autofix {
    use super::*;
    use pretty_assertions::assert_eq;

    fn damaged_atlas() -> MechDef {
        let mut mech = atlas().with_item(MountedItem::new("Gear_Missing", LeftArm));
        mech.inventory
            .retain(|item| item.component_id == "Weapon_AC20" || item.component_id == "Gear_Missing");
        mech
    }

    /// S3.1: Broken references are dropped, fixed gear and defaults restored
    #[test]
    fn s3_1_repair_damaged_mech() {
        let session = catalog::session();
        let mut batch = vec![damaged_atlas()];

        let report = session.fix_mechs(&mut batch);

        assert!(!report.skipped);
        assert_eq!(
            report.pass("remove_empty_refs").unwrap().changed,
            vec!["mechdef_atlas_AS7-D"]
        );
        assert_eq!(
            ids(&batch[0]),
            vec!["Weapon_AC20", "Gear_Cockpit", "Gear_Engine_Empty"]
        );
        assert!(batch[0].inventory()[1].fixed);
    }

    /// S3.2: A second run changes nothing
    #[test]
    fn s3_2_repair_is_idempotent() {
        let session = catalog::session();
        let mut batch = vec![damaged_atlas(), atlas()];

        session.fix_mechs(&mut batch);
        let once = batch.clone();
        let report = session.fix_mechs(&mut batch);

        assert!(report.is_clean());
        assert_eq!(batch, once);
    }

    /// S3.3: Save-game passes only run for saved mechs and see the save state
    #[test]
    fn s3_3_save_game_passes() {
        let mut session = catalog::session();
        session
            .fixer_mut()
            .register_save_fixer("strip_weapons", |mech, ctx| {
                if !ctx.state.is_some_and(|s| s.has_tag("no_weapons")) {
                    return Ok(false);
                }
                let kept: Vec<_> = mech
                    .inventory()
                    .iter()
                    .filter(|i| !i.component_id.starts_with("Weapon_"))
                    .cloned()
                    .collect();
                mech.set_inventory(kept);
                Ok(true)
            });

        let mut batch = vec![atlas()];
        let report = session.fix_mechs(&mut batch);
        assert!(report.pass("strip_weapons").is_none());
        assert_eq!(count(&batch[0], "Weapon_AC20"), 1);

        let state = SaveState::new().with_tag("no_weapons");
        let report = session.fix_saved_mechs(&mut batch, &state);
        assert_eq!(
            report.pass("strip_weapons").unwrap().changed,
            vec!["mechdef_atlas_AS7-D"]
        );
        assert_eq!(count(&batch[0], "Weapon_AC20"), 0);
    }

    /// S3.4: A failing pass is isolated to the mech it failed on
    #[test]
    fn s3_4_failure_is_isolated() {
        let mut session = catalog::session();
        session.fixer_mut().register_fixer("reject_atlas", |mech, _| {
            if mech.name() == "Atlas" {
                return Err(Error::FixFailed {
                    pass: "reject_atlas".into(),
                    message: "unsupported chassis".into(),
                });
            }
            Ok(false)
        });

        let mut batch = vec![atlas(), MechDef::new("mechdef_locust", "Locust")];
        let report = session.fix_mechs(&mut batch);

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].1.mech, "mechdef_atlas_AS7-D");
        assert!(failures[0].1.message.contains("unsupported chassis"));
        assert!(report.pass("re_add_fixed").is_some());
    }

    /// S3.5: Settings can disable the save-game run
    #[test]
    fn s3_5_save_run_disabled_by_settings() {
        let mut settings = catalog::settings();
        settings.fix_save_game_mech = false;
        let mut session = Session::new(settings);
        catalog::load_catalog(&mut session);

        let mut batch = vec![damaged_atlas()];
        assert!(session.fix_saved_mechs(&mut batch, &SaveState::new()).skipped);
        assert_eq!(batch[0], damaged_atlas());
        assert!(!session.fix_mechs(&mut batch).skipped);
    }
}

// =============================================================================
// Scenario 4: Descriptions and salvage
// =============================================================================

mod s4_presentation {
    use super::*;
    use pretty_assertions::assert_eq;

    /// S4.1: Jump jets get their category name in the description
    #[test]
    fn s4_1_description_block() {
        let session = catalog::session();

        assert_eq!(
            session.adjust_description("Gear_JumpJet", "Lift off."),
            "Lift off.\n<b><color=#5ed4ff>[Jump Jets]</color></b>"
        );
        assert_eq!(session.adjust_description("Gear_Engine_300", "Fusion."), "Fusion.");
    }

    /// S4.2: Cockpits never show up as salvage
    #[test]
    fn s4_2_salvage_filter() {
        let session = catalog::session();
        let mut salvage = atlas().inventory;

        session.filter_salvage(&mut salvage);

        let ids: Vec<_> = salvage.iter().map(|i| i.component_id.as_str()).collect();
        assert_eq!(ids, vec!["Gear_Engine_300", "Weapon_AC20"]);
    }
}
