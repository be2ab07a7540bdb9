//! Configuration module for asset-manager
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ASSET_MANAGER_*)
//! 3. Project config (<root>/asset-manager.toml)
//! 4. User config (~/.config/asset-manager/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    user_config_path, ConfigWarning, LoadRequest, LoadedSettings, ENV_DEFER_INSTALLS,
    ENV_LEGACY_PHP, ENV_PROJECT_ROOT, ENV_PUBLIC_DIR, PROJECT_CONFIG_FILE,
};
pub use types::{ModulesConfig, OrchestratorConfig, ProjectConfig, Settings};
