//! Prune result types

use serde::Serialize;

use crate::domain::value_objects::{AssetGroup, SkipReason};

/// Result of a prune run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PruneReport {
    /// Tracked groups no package declares, present under the public directory
    pub orphans: Vec<AssetGroup>,
    /// Orphans actually deleted
    pub removed: Vec<AssetGroup>,
    /// Packages whose declarations could not be read; nothing is deleted
    /// while this is non-empty
    pub unreadable: Vec<String>,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl PruneReport {
    pub fn skipped(mut self, reason: SkipReason) -> Self {
        self.skipped = Some(reason);
        self
    }
}
