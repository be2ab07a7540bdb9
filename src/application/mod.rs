//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `InstallUseCase` - Copies a package's asset groups into the public directory
//! - `UninstallUseCase` - Removes the tracked groups a package published
//! - `Orchestrator` - Routes lifecycle events, defers installs until commit
//! - `PruneUseCase` - Removes groups no installed package declares

pub mod install;
pub mod orchestrator;
pub mod prune;
mod sources;
pub mod uninstall;

#[cfg(test)]
pub(crate) mod test_support;

pub use install::{InstallOptions, InstallReport, InstallUseCase};
pub use orchestrator::{
    Action, ActionReport, LifecycleEvent, Orchestrator, OrchestratorOptions, Outcome, TaskQueue,
};
pub use prune::{PruneOptions, PruneReport, PruneUseCase};
pub use uninstall::{KeepReason, KeptGroup, UninstallOptions, UninstallReport, UninstallUseCase};
