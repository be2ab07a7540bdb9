//! asset-manager CLI
//!
//! Usage: asset-manager <COMMAND>
//!
//! Commands:
//!   install    Publish the assets of packages
//!   uninstall  Remove the assets packages published
//!   update     Swap a package's assets for its new version
//!   apply      Replay lifecycle events from a file or stdin
//!   check      Inspect a module configuration file
//!   prune      Remove orphaned asset groups

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::new(cli.json, cli.verbose, cli.project_root, cli.defer);

    match cli.command {
        Commands::Install { packages, path } => commands::install::cmd_install(&ctx, &packages, path),
        Commands::Uninstall { packages, path } => {
            commands::uninstall::cmd_uninstall(&ctx, &packages, path)
        }
        Commands::Update {
            package,
            from_path,
            path,
        } => commands::update::cmd_update(&ctx, &package, from_path, path),
        Commands::Apply { events } => commands::apply::cmd_apply(&ctx, &events),
        Commands::Check { config } => commands::check::cmd_check(&ctx, &config),
        Commands::Prune { dry_run, yes } => commands::prune::cmd_prune(&ctx, dry_run, yes),
    }
}

/// Log to stderr; `-v` raises the level, `RUST_LOG` wins when set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("asset_manager={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
