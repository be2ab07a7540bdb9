//! Domain Services
//!
//! Pure logic for inspecting package configuration files.
//! Only the safety checker touches the filesystem, and only to read.

pub mod php_config;
pub mod php_lexer;
pub mod safety;

pub use php_config::evaluate_return;
pub use safety::{unsafe_config_message, ConfigSafetyChecker, SafetyVerdict};
