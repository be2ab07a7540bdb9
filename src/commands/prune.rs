//! Prune command handler
//!
//! Removes asset groups that are tracked in the public `.gitignore` but that
//! no installed package declares any more. Always previews first; deletion
//! needs `--yes` or an interactive confirmation.

use std::sync::Arc;

use anyhow::{bail, Result};
use is_terminal::IsTerminal;
use serde_json::json;

use asset_manager::application::{PruneOptions, PruneReport, PruneUseCase};
use asset_manager::infrastructure::{LocalFs, LockedGitignoreStore, StderrDiagnostics};

use super::context::Context;

pub fn cmd_prune(ctx: &Context, dry_run: bool, yes: bool) -> Result<()> {
    let loaded = ctx.settings()?;
    let resolver = ctx.resolver(&loaded);
    let installed = resolver.installed()?;
    if installed.is_empty() {
        bail!(
            "no installed packages recorded under {}; refusing to prune",
            resolver.vendor_dir().display()
        );
    }

    let use_case = PruneUseCase::new(
        LocalFs::new(),
        LockedGitignoreStore::new(),
        ctx.config_loader(&loaded),
        resolver.clone(),
        Arc::new(StderrDiagnostics),
    );
    let options = PruneOptions::new(loaded.public_dir());

    let preview = use_case.execute(installed.packages(), &options)?;
    let deletable = !preview.orphans.is_empty() && preview.unreadable.is_empty();

    let proceed = if dry_run || !deletable {
        false
    } else if yes {
        true
    } else if std::io::stdin().is_terminal() && !ctx.json {
        print_report(&preview);
        dialoguer::Confirm::new()
            .with_prompt(format!("Remove {} asset group(s)?", preview.orphans.len()))
            .default(false)
            .interact()?
    } else {
        bail!("refusing to prune without --yes when not running interactively");
    };

    let report = if proceed {
        use_case.execute(installed.packages(), &options.with_dry_run(false))?
    } else {
        preview
    };

    if ctx.json {
        println!("{}", json!({ "type": "prune", "report": report }));
    } else if proceed || dry_run || !deletable {
        print_report(&report);
    } else {
        println!("Aborted.");
    }
    Ok(())
}

fn print_report(report: &PruneReport) {
    if let Some(reason) = report.skipped {
        println!("Nothing to prune ({})", reason);
        return;
    }
    for package in &report.unreadable {
        eprintln!(
            "Warning: cannot read asset configuration of {}; nothing will be removed",
            package
        );
    }
    if report.orphans.is_empty() {
        println!("No orphaned asset groups.");
        return;
    }
    if report.removed.is_empty() {
        println!("Orphaned asset groups:");
        for group in &report.orphans {
            println!("  {}/", group);
        }
    } else {
        println!("Removed {} asset group(s):", report.removed.len());
        for group in &report.removed {
            println!("  - {}/", group);
        }
    }
}
