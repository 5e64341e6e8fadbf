//! Property tests for manifest persistence.

use std::collections::BTreeMap;

use proptest::prelude::*;

use claude_plugins::manifest::{read_manifest, write_manifest, Manifest, PluginEntry};

fn manifest_entries() -> impl Strategy<Value = BTreeMap<String, (String, Vec<String>)>> {
    let name = proptest::string::string_regex("[a-z][a-z0-9-]{0,12}").unwrap();
    let version = proptest::string::string_regex("[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}").unwrap();
    let file = proptest::string::string_regex("(skills|commands|agents|hooks)/[a-z]{1,8}").unwrap();
    proptest::collection::btree_map(
        name,
        (version, proptest::collection::vec(file, 0..5)),
        0..5,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A manifest written to disk reads back with identical
    /// entries.
    #[test]
    fn property_manifest_round_trips(entries in manifest_entries()) {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = Manifest::new();
        for (package_name, (version, files)) in &entries {
            manifest.upsert(
                package_name.clone(),
                PluginEntry::new(version.clone(), files.clone()),
            );
        }

        write_manifest(dir.path(), &manifest).unwrap();
        let read = read_manifest(dir.path());

        prop_assert_eq!(read.plugins, manifest.plugins);
    }

    /// PROPERTY: read_manifest never panics on arbitrary file content.
    #[test]
    fn property_read_never_panics_on_garbage(content in ".{0,256}") {
        let dir = tempfile::tempdir().unwrap();
        let claude = dir.path().join(".claude");
        std::fs::create_dir_all(&claude).unwrap();
        std::fs::write(claude.join(".plugins-manifest.json"), &content).unwrap();

        let _ = read_manifest(dir.path());
    }
}
