//! Declared asset sources
//!
//! Shared by install and uninstall: turns a package's configuration lookup
//! into either the list of declared source directories or a skip reason,
//! emitting the unsafe-configuration diagnostic on the way.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::ports::{ConfigLookup, DiagnosticSink, ModuleConfigSource};
use crate::domain::services::unsafe_config_message;
use crate::domain::value_objects::SkipReason;
use crate::error::AssetResult;

/// Source directories declared by one package
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DeclaredSources {
    pub config: PathBuf,
    pub paths: Vec<PathBuf>,
}

pub(crate) fn declared_sources(
    configs: &impl ModuleConfigSource,
    diagnostics: &dyn DiagnosticSink,
    install_path: &Path,
) -> AssetResult<Result<DeclaredSources, SkipReason>> {
    let config = match configs.lookup(install_path)? {
        ConfigLookup::Loaded(config) => config,
        ConfigLookup::Missing => {
            debug!(install_path = %install_path.display(), "no module configuration");
            return Ok(Err(SkipReason::NoModuleConfig));
        }
        ConfigLookup::NotNeeded(path) => {
            debug!(config = %path.display(), "no asset_manager key");
            return Ok(Err(SkipReason::NoAssetManagerKey));
        }
        ConfigLookup::Unsafe(path) => {
            warn!(config = %path.display(), "refusing to read configuration");
            diagnostics.emit(&unsafe_config_message(&path));
            return Ok(Err(SkipReason::UnsafeConfig));
        }
        ConfigLookup::Malformed(path) => {
            debug!(config = %path.display(), "unreadable module configuration");
            return Ok(Err(SkipReason::NoAssetPaths));
        }
    };

    match config.asset_paths() {
        Some(paths) => Ok(Ok(DeclaredSources {
            config: config.source().to_path_buf(),
            paths,
        })),
        None => {
            debug!(config = %config.source().display(), "no asset paths declared");
            Ok(Err(SkipReason::NoAssetPaths))
        }
    }
}
