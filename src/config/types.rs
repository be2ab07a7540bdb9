//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AssetResult;

use super::loader::{self, ConfigWarning, LoadRequest, LoadedSettings};

/// Project layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Public web root, relative to the project root
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Package manager's vendor directory, relative to the project root
    #[serde(default = "default_vendor_dir")]
    pub vendor_dir: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            vendor_dir: default_vendor_dir(),
        }
    }
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_vendor_dir() -> PathBuf {
    PathBuf::from("vendor")
}

/// Module configuration discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulesConfig {
    /// Read `module.config.php` files (statically, after the safety gate)
    #[serde(default = "default_true")]
    pub legacy_php: bool,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            legacy_php: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Event handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OrchestratorConfig {
    /// Hold installs until the host commits its batch
    #[serde(default)]
    pub defer_installs: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub modules: ModulesConfig,

    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

impl Settings {
    /// Load a single TOML file
    pub fn load(path: &Path) -> AssetResult<Self> {
        let (settings, _warnings) = loader::load_with_warnings(path)?;
        Ok(settings)
    }

    /// Load a single TOML file and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> AssetResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load every layer: CLI > environment > project file > user file > defaults
    pub fn load_layered(request: &LoadRequest) -> AssetResult<LoadedSettings> {
        loader::load_layered(request)
    }

    /// Absolute public directory for a project
    pub fn public_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.project.public_dir)
    }

    /// Absolute vendor directory for a project
    pub fn vendor_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.project.vendor_dir)
    }
}
