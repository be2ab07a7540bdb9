//! Domain Entities
//!
//! - `Package` - A dependency package as reported by the host
//! - `ModuleConfig` - Parsed package configuration tree
//! - `GitignoreLines` - In-memory view of the public `.gitignore`

mod gitignore;
mod module_config;
mod package;

pub use gitignore::GitignoreLines;
pub use module_config::{ConfigKey, ConfigValue, ModuleConfig, ASSET_PATHS_KEY};
pub use package::Package;
