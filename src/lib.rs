//! asset-manager - publishes package assets into a project's public directory
//!
//! Packages declare asset source directories in their module configuration.
//! Each top-level subdirectory of a source is an asset group: installing a
//! package copies its groups into the public directory and records them in
//! the public `.gitignore`; uninstalling removes the groups it tracked.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    InstallReport, LifecycleEvent, Orchestrator, OrchestratorOptions, Outcome, PruneReport,
    UninstallReport,
};
pub use config::{LoadRequest, LoadedSettings, Settings};
pub use domain::entities::{GitignoreLines, ModuleConfig, Package};
pub use domain::value_objects::{AssetGroup, SkipReason};
pub use error::{AssetError, AssetResult};
