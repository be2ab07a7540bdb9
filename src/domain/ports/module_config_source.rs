//! ModuleConfigSource port - locating and reading a package's configuration

use std::path::{Path, PathBuf};

use crate::domain::entities::ModuleConfig;
use crate::error::AssetResult;

/// Result of looking for a package's configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigLookup {
    /// No configuration file in the package
    Missing,
    /// Legacy file without an `asset_manager` key
    NotNeeded(PathBuf),
    /// Legacy file using `exit()` or `eval()`; never read
    Unsafe(PathBuf),
    /// File exists but holds no readable document
    Malformed(PathBuf),
    Loaded(ModuleConfig),
}

pub trait ModuleConfigSource {
    /// Find and read the configuration under a package's install path.
    ///
    /// Only I/O failures are errors; everything else is a `ConfigLookup`.
    fn lookup(&self, install_path: &Path) -> AssetResult<ConfigLookup>;
}

impl<T: ModuleConfigSource + ?Sized> ModuleConfigSource for &T {
    fn lookup(&self, install_path: &Path) -> AssetResult<ConfigLookup> {
        (**self).lookup(install_path)
    }
}
