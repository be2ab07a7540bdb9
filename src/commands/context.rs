//! Wiring shared by every command

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use asset_manager::application::{Orchestrator, OrchestratorOptions};
use asset_manager::config::{LoadRequest, LoadedSettings, Settings};
use asset_manager::infrastructure::{
    LocalFs, LockedGitignoreStore, ModuleConfigLoader, StderrDiagnostics, VendorResolver,
};

pub type ProjectOrchestrator =
    Orchestrator<LocalFs, LockedGitignoreStore, ModuleConfigLoader, VendorResolver>;

/// Global flags plus the settings they select
pub struct Context {
    pub json: bool,
    pub verbose: u8,
    project_root: Option<PathBuf>,
    defer: bool,
}

impl Context {
    pub fn new(json: bool, verbose: u8, project_root: Option<PathBuf>, defer: bool) -> Self {
        Self {
            json,
            verbose,
            project_root,
            defer,
        }
    }

    /// Load layered settings and print any config warnings
    pub fn settings(&self) -> Result<LoadedSettings> {
        let loaded = Settings::load_layered(&LoadRequest {
            project_root: self.project_root.clone(),
            defer_installs: self.defer,
            user_config: None,
        })?;

        for warning in &loaded.warnings {
            eprintln!("Warning: {}", warning);
        }
        debug!(
            root = %loaded.project_root.display(),
            sources = ?loaded.sources,
            "settings loaded"
        );

        Ok(loaded)
    }

    pub fn resolver(&self, loaded: &LoadedSettings) -> VendorResolver {
        VendorResolver::new(&loaded.project_root, &loaded.settings.project.vendor_dir)
    }

    pub fn config_loader(&self, loaded: &LoadedSettings) -> ModuleConfigLoader {
        ModuleConfigLoader::new(loaded.settings.modules.legacy_php)
    }

    pub fn orchestrator(&self, loaded: &LoadedSettings) -> ProjectOrchestrator {
        let options = OrchestratorOptions::new(loaded.public_dir())
            .with_defer_installs(loaded.settings.orchestrator.defer_installs);

        Orchestrator::new(
            LocalFs::new(),
            LockedGitignoreStore::new(),
            self.config_loader(loaded),
            self.resolver(loaded),
            Arc::new(StderrDiagnostics),
            options,
        )
    }
}
