//! Orchestrator options

use std::path::PathBuf;

/// Options shared by every action the orchestrator runs
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Public directory assets are published into
    pub public_dir: PathBuf,
    /// Hold installs until `Commit`
    pub defer_installs: bool,
}

impl OrchestratorOptions {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
            defer_installs: false,
        }
    }

    pub fn with_defer_installs(mut self, defer: bool) -> Self {
        self.defer_installs = defer;
        self
    }
}
