//! Property tests for `.gitignore` line handling.

use proptest::prelude::*;

use asset_manager::{AssetGroup, GitignoreLines};

fn gitignore_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9_*#!./ -]{0,16}").unwrap()
}

fn group_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_-]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: LF-only content renders back to the same text.
    #[test]
    fn property_lf_content_round_trips(lines in proptest::collection::vec(gitignore_line(), 0..10)) {
        let content = lines.join("\n");
        prop_assert_eq!(GitignoreLines::parse(&content).render(), content);
    }

    /// PROPERTY: arbitrary bytes without CR survive parse and render untouched.
    #[test]
    fn property_lf_bytes_round_trip(content in proptest::collection::vec(any::<u8>().prop_filter("no CR", |b| *b != b'\r'), 0..64)) {
        prop_assert_eq!(GitignoreLines::from_bytes(&content).to_bytes(), content);
    }

    /// PROPERTY: adding an entry twice leaves exactly one copy.
    #[test]
    fn property_add_entry_is_idempotent(
        lines in proptest::collection::vec(gitignore_line(), 0..10),
        name in group_name(),
    ) {
        let group = AssetGroup::new(name).unwrap();
        let mut gitignore = GitignoreLines::parse(&lines.join("\n"));

        gitignore.add_entry(&group);
        let once = gitignore.render();
        prop_assert!(!gitignore.add_entry(&group));
        prop_assert_eq!(gitignore.render(), once);

        let entry = group.gitignore_entry();
        let copies = gitignore.lines().iter().filter(|line| **line == entry).count();
        prop_assert!(copies >= 1);
    }

    /// PROPERTY: install then uninstall of a new group restores the text.
    #[test]
    fn property_add_then_remove_restores_content(
        lines in proptest::collection::vec(gitignore_line(), 0..10),
        name in group_name(),
    ) {
        let group = AssetGroup::new(name).unwrap();
        let content = lines.join("\n");
        let mut gitignore = GitignoreLines::parse(&content);
        prop_assume!(!gitignore.contains(&group));

        prop_assert!(gitignore.add_entry(&group));
        prop_assert!(gitignore.remove_entry(&group));
        prop_assert_eq!(gitignore.render(), content);
    }

    /// PROPERTY: every group the parser reports is written back as the same line.
    #[test]
    fn property_group_entries_come_from_lines(lines in proptest::collection::vec(gitignore_line(), 0..10)) {
        let gitignore = GitignoreLines::parse(&lines.join("\n"));
        for group in gitignore.group_entries() {
            prop_assert!(gitignore.contains(&group));
        }
    }
}
