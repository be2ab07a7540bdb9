//! Reasons an install or uninstall run turned into a no-op

use serde::Serialize;

/// Why a package was skipped without touching the public directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Project has no public directory
    NoPublicDirectory,
    /// Public directory has no `.gitignore` (uninstall only)
    NoGitignore,
    /// Package ships no module configuration file
    NoModuleConfig,
    /// Legacy configuration does not mention `asset_manager`
    NoAssetManagerKey,
    /// Legacy configuration uses `eval` or `exit`
    UnsafeConfig,
    /// Configuration is malformed or declares no asset paths
    NoAssetPaths,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoPublicDirectory => write!(f, "no public directory"),
            SkipReason::NoGitignore => write!(f, "no public .gitignore"),
            SkipReason::NoModuleConfig => write!(f, "no module configuration"),
            SkipReason::NoAssetManagerKey => write!(f, "no asset_manager configuration"),
            SkipReason::UnsafeConfig => write!(f, "configuration uses exit() or eval()"),
            SkipReason::NoAssetPaths => write!(f, "no asset paths declared"),
        }
    }
}
