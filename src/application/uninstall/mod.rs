//! Uninstall Use Case
//!
//! Removes the asset groups a package published, but only those the public
//! `.gitignore` says were published.

mod options;
mod result;
mod use_case;

#[cfg(test)]
mod tests;

pub use options::UninstallOptions;
pub use result::{KeepReason, KeptGroup, UninstallReport};
pub use use_case::UninstallUseCase;
