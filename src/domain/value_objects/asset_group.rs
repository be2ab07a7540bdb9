//! Asset group value object
//!
//! An asset group is a top-level subdirectory of a declared source path. The
//! same name becomes a folder under the public directory and a `name/` line in
//! the public `.gitignore`.

use std::fmt;

use serde::Serialize;

use crate::error::{AssetError, AssetResult};

/// Characters that turn a `.gitignore` line into a pattern rather than a name
const PATTERN_CHARS: &[char] = &['*', '?', '[', ']', '!', '\\'];

/// Validated asset group name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AssetGroup(String);

impl AssetGroup {
    /// Validate a directory name as an asset group.
    pub fn new(name: impl Into<String>) -> AssetResult<Self> {
        let name = name.into();
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\', '\n', '\r']);
        if invalid {
            return Err(AssetError::InvalidGroupName { name });
        }
        Ok(Self(name))
    }

    /// Parse a `.gitignore` line written by the installer (`name/`).
    ///
    /// Lines with patterns, comments, leading slashes or nested paths are
    /// never treated as asset groups.
    pub fn from_gitignore_entry(line: &str) -> Option<Self> {
        let name = line.strip_suffix('/')?;
        if name.starts_with('#') || name.contains(PATTERN_CHARS) || name.trim() != name {
            return None;
        }
        Self::new(name).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Line recorded in the public `.gitignore`
    pub fn gitignore_entry(&self) -> String {
        format!("{}/", self.0)
    }
}

impl fmt::Display for AssetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetGroup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gitignore_entry_has_trailing_slash() {
        let group = AssetGroup::new("api-tools").unwrap();
        assert_eq!(group.gitignore_entry(), "api-tools/");
    }

    #[test]
    fn rejects_dot_entries_and_separators() {
        for name in ["", ".", "..", "a/b", "a\\b", "line\nbreak"] {
            assert!(AssetGroup::new(name).is_err(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn hidden_directories_are_valid_groups() {
        assert!(AssetGroup::new(".well-known").is_ok());
    }

    #[test]
    fn from_gitignore_entry_accepts_plain_names() {
        let group = AssetGroup::from_gitignore_entry("api-tools-foobar/").unwrap();
        assert_eq!(group.as_str(), "api-tools-foobar");
    }

    #[test]
    fn from_gitignore_entry_rejects_user_rules() {
        for line in [
            "*.log",
            "uploads",
            "/uploads/",
            "cache/tmp/",
            "build*/",
            "# comment/",
            "",
            "/",
            " padded/",
        ] {
            assert!(
                AssetGroup::from_gitignore_entry(line).is_none(),
                "{line:?} should not be an asset group"
            );
        }
    }
}
