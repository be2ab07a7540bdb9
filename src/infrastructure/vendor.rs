//! Composer vendor directory
//!
//! Reads `vendor/composer/installed.json` to find where each package was
//! installed, falling back to the conventional `vendor/<name>` layout.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::entities::Package;
use crate::domain::ports::InstallPathResolver;
use crate::error::{AssetError, AssetResult};

/// Manifest written by Composer, relative to the vendor directory
pub const INSTALLED_MANIFEST: &str = "composer/installed.json";

/// Composer 2 wraps the package list in an object; Composer 1 writes a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum InstalledManifest {
    Object { packages: Vec<Package> },
    List(Vec<Package>),
}

/// Packages recorded in `installed.json`, with install paths made absolute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstalledPackages {
    packages: Vec<Package>,
}

impl InstalledPackages {
    /// Load the manifest under `vendor_dir`. A missing manifest is an empty list.
    pub fn load(vendor_dir: &Path) -> AssetResult<Self> {
        let path = vendor_dir.join(INSTALLED_MANIFEST);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| AssetError::io(&path, e))?;
        let manifest: InstalledManifest =
            serde_json::from_str(&content).map_err(|e| AssetError::InstalledManifest {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let packages = match manifest {
            InstalledManifest::Object { packages } | InstalledManifest::List(packages) => packages,
        };
        let base = path.parent().unwrap_or(vendor_dir);
        let packages = packages
            .into_iter()
            .map(|mut package| {
                let install_path = match package.install_path.take() {
                    Some(p) if p.is_absolute() => p,
                    Some(p) => base.join(p),
                    None => vendor_dir.join(&package.name),
                };
                package.install_path = Some(install_path);
                package
            })
            .collect();

        Ok(Self { packages })
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn find(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Resolves install paths inside a project's vendor directory
#[derive(Debug, Clone)]
pub struct VendorResolver {
    project_root: PathBuf,
    vendor_dir: PathBuf,
}

impl VendorResolver {
    /// `vendor_dir` may be relative to `project_root`
    pub fn new(project_root: impl Into<PathBuf>, vendor_dir: impl AsRef<Path>) -> Self {
        let project_root = project_root.into();
        let vendor_dir = project_root.join(vendor_dir);
        Self {
            project_root,
            vendor_dir,
        }
    }

    pub fn vendor_dir(&self) -> &Path {
        &self.vendor_dir
    }

    pub fn installed(&self) -> AssetResult<InstalledPackages> {
        InstalledPackages::load(&self.vendor_dir)
    }
}

impl InstallPathResolver for VendorResolver {
    fn install_path(&self, package: &Package) -> AssetResult<PathBuf> {
        if let Some(path) = &package.install_path {
            return Ok(self.project_root.join(path));
        }

        if let Some(installed) = self.installed()?.find(&package.name) {
            if let Some(path) = &installed.install_path {
                return Ok(path.clone());
            }
        }

        Ok(self.vendor_dir.join(&package.name))
    }
}
