//! Orchestrator
//!
//! Maps package lifecycle events onto the install and uninstall use cases.
//!
//! - `LifecycleEvent` - install, update, uninstall and commit
//! - `TaskQueue` - FIFO of installs held back until commit in deferred mode
//! - `Outcome` - per-package result; one failure never stops the others

mod event;
mod options;
mod outcome;
mod queue;
mod use_case;


pub use event::LifecycleEvent;
pub use options::OrchestratorOptions;
pub use outcome::{Action, ActionReport, Outcome};
pub use queue::TaskQueue;
pub use use_case::Orchestrator;
