//! Install result types

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::{AssetGroup, SkipReason};

/// Result of installing one package's assets
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstallReport {
    pub package: String,
    /// Configuration file the asset paths came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<PathBuf>,
    /// Groups copied, in processing order
    pub groups: Vec<AssetGroup>,
    pub files_copied: usize,
    /// Groups whose `.gitignore` entry was newly added
    pub entries_added: Vec<AssetGroup>,
    /// Set when nothing was done
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl InstallReport {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    pub fn skipped(mut self, reason: SkipReason) -> Self {
        self.skipped = Some(reason);
        self
    }
}
