//! Install Use Case
//!
//! Publishes a package's asset groups into the public directory.
//!
//! This module handles:
//! - Locating and gating the package configuration
//! - Copying every file of each asset group
//! - Recording each group in the public `.gitignore`

mod options;
mod result;
mod use_case;


pub use options::InstallOptions;
pub use result::InstallReport;
pub use use_case::InstallUseCase;
