#![no_main]

use libfuzzer_sys::fuzz_target;

use asset_manager::{AssetGroup, GitignoreLines};

fuzz_target!(|data: &[u8]| {
    let mut lines = GitignoreLines::from_bytes(data);
    let groups: Vec<AssetGroup> = lines.group_entries().collect();

    let rendered = lines.to_bytes();
    assert_eq!(GitignoreLines::from_bytes(&rendered).to_bytes(), rendered);

    for group in &groups {
        assert!(lines.remove_entry(group));
    }
});
