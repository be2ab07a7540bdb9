//! Install options

use std::path::PathBuf;

/// Options for publishing assets
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Public directory assets are copied into
    pub public_dir: PathBuf,
}

impl InstallOptions {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    /// `.gitignore` inside the public directory
    pub fn gitignore_path(&self) -> PathBuf {
        self.public_dir.join(".gitignore")
    }
}
