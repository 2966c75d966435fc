//! End-to-end install flows through the registered installer and mod type.

use std::path::Path;
use std::sync::Arc;

use ummlink_core::context::{ExtensionContext, register_umm};
use ummlink_core::installer::INSTALLER_ID;
use ummlink_core::modtype::MOD_TYPE_ID;
use ummlink_core::store::{ConfigStore, MemoryStore};
use ummlink_core::tools::{DEFAULT_TOOL_ID, ToolRecord};

fn payload() -> Vec<String> {
    vec![
        "Mods/Foo/UnityModManager.exe".to_string(),
        "Mods/Foo/data.bin".to_string(),
    ]
}

fn setup() -> (Arc<MemoryStore>, ExtensionContext) {
    let store = Arc::new(MemoryStore::new());
    store
        .set_install_path("dawnofman", "/games/mods/dawnofman")
        .unwrap();
    let mut context = ExtensionContext::new();
    register_umm(&mut context, store.clone());
    (store, context)
}

#[test]
fn test_supported_payload_installs_and_registers_tool() {
    let (store, context) = setup();
    let installer = context.installer(INSTALLER_ID).unwrap();

    let support = installer.test(&payload(), "dawnofman");
    assert!(support.supported);
    assert!(support.required_files.is_empty());

    let result = installer
        .install(
            &payload(),
            Path::new("/staging/UMM-0.25.installing"),
            "dawnofman",
        )
        .unwrap();

    let destinations: Vec<_> = result
        .instructions
        .iter()
        .filter_map(|i| i.copy_destination())
        .collect();
    assert_eq!(destinations, vec!["UnityModManager.exe", "data.bin"]);

    let tools = store.tools("dawnofman").unwrap().unwrap();
    let record = &tools[DEFAULT_TOOL_ID];
    assert_eq!(record.install_directory(), Some("/games/mods/dawnofman/UMM-0.25"));
    assert_eq!(
        record.working_directory.as_deref(),
        Some("/games/mods/dawnofman/UMM-0.25")
    );

    let mod_type = context.mod_type(MOD_TYPE_ID).unwrap();
    assert!(mod_type.classify(&result.instructions));
}

#[test]
fn test_unsupported_target_is_rejected() {
    let (store, context) = setup();
    let installer = context.installer(INSTALLER_ID).unwrap();

    assert!(!installer.test(&payload(), "unsupported_game").supported);
    assert_eq!(store.write_count(), 0);
}

#[test]
fn test_reinstall_same_location_writes_once() {
    let (store, context) = setup();
    let installer = context.installer(INSTALLER_ID).unwrap();
    let destination = Path::new("/staging/UMM.installing");

    installer.install(&payload(), destination, "dawnofman").unwrap();
    installer.install(&payload(), destination, "dawnofman").unwrap();

    assert_eq!(store.write_count(), 1);
}

#[test]
fn test_reinstall_elsewhere_keeps_user_id() {
    let (store, context) = setup();
    store
        .upsert_tool(
            "dawnofman",
            "my-umm",
            ToolRecord::unity_mod_manager("my-umm", Path::new("/old/place")),
        )
        .unwrap();
    let installer = context.installer(INSTALLER_ID).unwrap();

    installer
        .install(&payload(), Path::new("/staging/UMM.installing"), "dawnofman")
        .unwrap();

    let tools = store.tools("dawnofman").unwrap().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(
        tools["my-umm"].install_directory(),
        Some("/games/mods/dawnofman/UMM")
    );
}

#[test]
fn test_install_without_anchor_propagates() {
    let (store, context) = setup();
    let installer = context.installer(INSTALLER_ID).unwrap();

    let err = installer
        .install(
            &["Mods/Foo/data.bin".to_string()],
            Path::new("/staging/x.installing"),
            "dawnofman",
        )
        .unwrap_err();

    assert!(matches!(err, ummlink_core::Error::AnchorNotFound { .. }));
    assert_eq!(store.write_count(), 0);
}
