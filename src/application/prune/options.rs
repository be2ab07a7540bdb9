//! Prune options

use std::path::PathBuf;

/// Options for the prune command
#[derive(Debug, Clone)]
pub struct PruneOptions {
    pub public_dir: PathBuf,
    /// Report orphans without deleting anything
    pub dry_run: bool,
}

impl PruneOptions {
    /// Dry run by default
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
            dry_run: true,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn gitignore_path(&self) -> PathBuf {
        self.public_dir.join(".gitignore")
    }
}
