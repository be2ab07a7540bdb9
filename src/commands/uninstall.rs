//! Uninstall command handler

use std::path::PathBuf;

use anyhow::Result;

use super::context::Context;
use super::output::report_outcomes;
use super::packages_from_args;

/// Remove the tracked asset groups of each named package
pub fn cmd_uninstall(ctx: &Context, packages: &[String], path: Option<PathBuf>) -> Result<()> {
    let packages = packages_from_args(packages, path)?;
    let loaded = ctx.settings()?;
    let mut orchestrator = ctx.orchestrator(&loaded);

    let outcomes: Vec<_> = packages
        .into_iter()
        .map(|package| orchestrator.uninstall(package))
        .collect();

    report_outcomes(&outcomes, ctx.json, ctx.verbose)
}
