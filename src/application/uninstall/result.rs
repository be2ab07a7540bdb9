//! Uninstall result types

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::{AssetGroup, SkipReason};

/// Why a declared group was left in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepReason {
    /// No `name/` line in the public `.gitignore`
    NotTracked,
    /// Tracked, but no such directory under the public directory
    NotPresent,
}

impl std::fmt::Display for KeepReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeepReason::NotTracked => write!(f, "not tracked in .gitignore"),
            KeepReason::NotPresent => write!(f, "not present"),
        }
    }
}

/// A declared group that was not removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeptGroup {
    pub group: AssetGroup,
    pub reason: KeepReason,
}

/// Result of removing one package's assets
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UninstallReport {
    pub package: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<PathBuf>,
    /// Groups deleted, in processing order
    pub removed: Vec<AssetGroup>,
    pub kept: Vec<KeptGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl UninstallReport {
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

    pub fn keep(&mut self, group: AssetGroup, reason: KeepReason) {
        self.kept.push(KeptGroup { group, reason });
    }
}
