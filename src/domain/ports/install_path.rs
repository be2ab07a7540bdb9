//! InstallPathResolver port - where the host placed a package on disk

use std::path::PathBuf;

use crate::domain::entities::Package;
use crate::error::AssetResult;

/// Resolves the directory a package was installed into.
///
/// Resolution must not modify anything on disk.
pub trait InstallPathResolver {
    fn install_path(&self, package: &Package) -> AssetResult<PathBuf>;
}

impl<T: InstallPathResolver + ?Sized> InstallPathResolver for &T {
    fn install_path(&self, package: &Package) -> AssetResult<PathBuf> {
        (**self).install_path(package)
    }
}
