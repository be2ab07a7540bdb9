//! Uninstall options

use std::path::PathBuf;

/// Options for removing published assets
#[derive(Debug, Clone)]
pub struct UninstallOptions {
    /// Public directory assets were copied into
    pub public_dir: PathBuf,
}

impl UninstallOptions {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    pub fn gitignore_path(&self) -> PathBuf {
        self.public_dir.join(".gitignore")
    }
}
