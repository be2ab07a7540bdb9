//! Rendering of per-package outcomes

use anyhow::{bail, Result};
use serde_json::json;

use asset_manager::application::{ActionReport, InstallReport, Outcome, UninstallReport};

/// Print every outcome, then fail if any action failed
pub fn report_outcomes(outcomes: &[Outcome], json: bool, verbose: u8) -> Result<()> {
    for outcome in outcomes {
        if json {
            println!("{}", outcome_json(outcome));
            continue;
        }
        match &outcome.result {
            Ok(ActionReport::Install(report)) => print_install(report),
            Ok(ActionReport::Uninstall(report)) => print_uninstall(report, verbose),
            Err(e) => eprintln!("{}: {} failed: {}", outcome.package, outcome.action, e),
        }
    }

    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    if failed > 0 {
        bail!("{} of {} asset actions failed", failed, outcomes.len());
    }
    Ok(())
}

fn outcome_json(outcome: &Outcome) -> serde_json::Value {
    match &outcome.result {
        Ok(report) => json!({
            "type": "outcome",
            "action": outcome.action,
            "package": outcome.package.name,
            "status": "ok",
            "report": report,
        }),
        Err(e) => json!({
            "type": "outcome",
            "action": outcome.action,
            "package": outcome.package.name,
            "status": "error",
            "error": e.to_string(),
        }),
    }
}

fn print_install(report: &InstallReport) {
    if let Some(reason) = report.skipped {
        println!("{}: nothing to publish ({})", report.package, reason);
        return;
    }
    println!(
        "{}: published {} group(s), {} file(s)",
        report.package,
        report.groups.len(),
        report.files_copied
    );
    for group in &report.groups {
        if report.entries_added.contains(group) {
            println!("  + {} (added to .gitignore)", group);
        } else {
            println!("  + {}", group);
        }
    }
}

fn print_uninstall(report: &UninstallReport, verbose: u8) {
    if let Some(reason) = report.skipped {
        println!("{}: nothing to remove ({})", report.package, reason);
        return;
    }
    println!(
        "{}: removed {} group(s)",
        report.package,
        report.removed.len()
    );
    for group in &report.removed {
        println!("  - {}", group);
    }
    if verbose > 0 {
        for kept in &report.kept {
            println!("  = {} ({})", kept.group, kept.reason);
        }
    }
}
