//! Update command handler

use std::path::PathBuf;

use anyhow::Result;

use asset_manager::domain::entities::Package;

use super::context::Context;
use super::output::report_outcomes;

/// Uninstall the previous version's assets, then install the new version's
pub fn cmd_update(
    ctx: &Context,
    name: &str,
    from_path: Option<PathBuf>,
    path: Option<PathBuf>,
) -> Result<()> {
    let mut from = Package::new(name);
    from.install_path = from_path;
    let mut to = Package::new(name);
    to.install_path = path;

    let loaded = ctx.settings()?;
    let mut orchestrator = ctx.orchestrator(&loaded);

    let mut outcomes = orchestrator.update(from, to);
    outcomes.extend(orchestrator.flush());

    report_outcomes(&outcomes, ctx.json, ctx.verbose)
}
