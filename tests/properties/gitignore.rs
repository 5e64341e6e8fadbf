//! Property tests for the managed .gitignore section.

use proptest::prelude::*;

use claude_plugins::gitignore::update_gitignore;

fn tracked_paths() -> impl Strategy<Value = Vec<String>> {
    let path = proptest::string::string_regex("(skills|commands|agents|hooks)/[a-z]{1,8}").unwrap();
    proptest::collection::vec(path, 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A second update with the same paths never rewrites the
    /// file.
    #[test]
    fn property_update_is_idempotent(paths in tracked_paths()) {
        let dir = tempfile::tempdir().unwrap();

        let first = update_gitignore(dir.path(), &paths).unwrap();
        let content = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        let second = update_gitignore(dir.path(), &paths).unwrap();
        let after = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();

        prop_assert!(first);
        prop_assert!(!second);
        prop_assert_eq!(content, after);
    }

    /// PROPERTY: Existing user content survives as a prefix of the updated
    /// file.
    #[test]
    fn property_user_content_is_preserved(
        user in "([a-z]{1,10}\n){0,4}",
        paths in tracked_paths(),
    ) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".gitignore"), &user).unwrap();

        update_gitignore(dir.path(), &paths).unwrap();

        let content = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        prop_assert!(content.starts_with(&user), "user content no longer a prefix:\n{}", content);
    }

    /// PROPERTY: Every tracked path ends up as exactly one /.claude/ line,
    /// duplicates included.
    #[test]
    fn property_each_path_appears_once(paths in tracked_paths()) {
        let dir = tempfile::tempdir().unwrap();
        let mut doubled = paths.clone();
        doubled.extend(paths.iter().cloned());

        update_gitignore(dir.path(), &doubled).unwrap();

        let content = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        for path in &paths {
            let line = format!("/.claude/{}", path);
            let count = content.lines().filter(|l| *l == line).count();
            prop_assert_eq!(count, 1, "expected one {} line:\n{}", line, content);
        }
    }
}
