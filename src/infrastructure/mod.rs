//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `gitignore` - Locked `.gitignore` store
//! - `module_config` - Package configuration loader (TOML, JSON, YAML, PHP)
//! - `vendor` - Install path resolution from the Composer vendor directory
//! - `diagnostics` - Stderr diagnostic sink

pub mod diagnostics;
pub mod fs;
pub mod gitignore;
pub mod module_config;
pub mod vendor;

// Re-export for convenience
pub use diagnostics::StderrDiagnostics;
pub use fs::LocalFs;
pub use gitignore::LockedGitignoreStore;
pub use module_config::{ConfigFormat, ModuleConfigLoader};
pub use vendor::{InstalledPackages, VendorResolver};
