//! Property tests for prepare-hook injection and removal.

use proptest::prelude::*;

use claude_plugins::hooks::{has_prepare_hook, inject_prepare_hook, remove_prepare_hook};

fn prepare_script() -> impl Strategy<Value = String> {
    // Shell-ish command lines: no '&' so the only chaining is ours, and no
    // leading/trailing whitespace so exact restoration is well-defined.
    proptest::string::string_regex("[a-z][a-z0-9 ._-]{0,24}[a-z0-9]")
        .unwrap()
        .prop_filter("script must not already contain the hook command", |s| {
            !s.contains("claude-plugins install")
        })
}

fn write_package_json(root: &std::path::Path, pkg: &serde_json::Value) {
    std::fs::write(
        root.join("package.json"),
        serde_json::to_string_pretty(pkg).unwrap(),
    )
    .unwrap();
}

fn read_package_json(root: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(root.join("package.json")).unwrap()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Injecting the hook and then removing it restores the
    /// original prepare script exactly.
    #[test]
    fn property_inject_then_remove_restores_prepare(script in prepare_script()) {
        let dir = tempfile::tempdir().unwrap();
        let pkg = serde_json::json!({ "name": "app", "scripts": { "prepare": script } });
        write_package_json(dir.path(), &pkg);

        prop_assert!(inject_prepare_hook(dir.path()));
        prop_assert!(has_prepare_hook(dir.path()));
        prop_assert!(remove_prepare_hook(dir.path()));

        let restored = read_package_json(dir.path());
        prop_assert_eq!(&restored["scripts"]["prepare"], script.as_str());
    }

    /// PROPERTY: Injection is idempotent; the second call never rewrites the
    /// script.
    #[test]
    fn property_inject_is_idempotent(script in prepare_script()) {
        let dir = tempfile::tempdir().unwrap();
        let pkg = serde_json::json!({ "name": "app", "scripts": { "prepare": script } });
        write_package_json(dir.path(), &pkg);

        prop_assert!(inject_prepare_hook(dir.path()));
        let after_first = read_package_json(dir.path());
        prop_assert!(!inject_prepare_hook(dir.path()));
        let after_second = read_package_json(dir.path());

        prop_assert_eq!(after_first, after_second);
    }

    /// PROPERTY: Unrelated package.json keys survive the full hook
    /// lifecycle untouched.
    #[test]
    fn property_unrelated_keys_survive(
        script in prepare_script(),
        extra in "[a-z]{1,12}",
    ) {
        let dir = tempfile::tempdir().unwrap();
        let pkg = serde_json::json!({
            "name": "app",
            "customField": extra,
            "scripts": { "prepare": script, "test": "jest" },
        });
        write_package_json(dir.path(), &pkg);

        inject_prepare_hook(dir.path());
        remove_prepare_hook(dir.path());

        let restored = read_package_json(dir.path());
        prop_assert_eq!(&restored["customField"], extra.as_str());
        prop_assert_eq!(&restored["scripts"]["test"], "jest");
    }
}
