//! Install command handler

use std::path::PathBuf;

use anyhow::Result;

use super::context::Context;
use super::output::report_outcomes;
use super::packages_from_args;

/// Publish the assets of each named package
pub fn cmd_install(ctx: &Context, packages: &[String], path: Option<PathBuf>) -> Result<()> {
    let packages = packages_from_args(packages, path)?;
    let loaded = ctx.settings()?;
    let mut orchestrator = ctx.orchestrator(&loaded);

    let mut outcomes = Vec::new();
    for package in packages {
        outcomes.extend(orchestrator.install(package));
    }
    outcomes.extend(orchestrator.flush());

    report_outcomes(&outcomes, ctx.json, ctx.verbose)
}
