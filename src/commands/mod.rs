//! Command handlers

use std::path::PathBuf;

use anyhow::{bail, Result};

use asset_manager::domain::entities::Package;

pub mod apply;
pub mod check;
pub mod install;
pub mod prune;
pub mod uninstall;
pub mod update;

mod context;
mod output;

pub use context::Context;

/// Packages named on the command line; `--path` applies to a single one
fn packages_from_args(names: &[String], path: Option<PathBuf>) -> Result<Vec<Package>> {
    if path.is_some() && names.len() > 1 {
        bail!("--path can only be used with a single package");
    }

    Ok(names
        .iter()
        .map(|name| {
            let package = Package::new(name.as_str());
            match &path {
                Some(path) => package.with_install_path(path),
                None => package,
            }
        })
        .collect())
}
