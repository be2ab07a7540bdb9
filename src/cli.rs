use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// asset-manager - publish package assets into the public directory
#[derive(Parser, Debug)]
#[command(name = "asset-manager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (one JSON object per line)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root (defaults to ASSET_MANAGER_PROJECT_ROOT, then the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Hold installs until the end of the run
    #[arg(long, global = true)]
    pub defer: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish the assets of one or more packages
    Install {
        /// Package names (e.g. vendor/package)
        #[arg(required = true)]
        packages: Vec<String>,

        /// Install path of the package, relative to the project root (single package only)
        #[arg(long, value_name = "DIR")]
        path: Option<PathBuf>,
    },

    /// Remove the assets one or more packages published
    Uninstall {
        /// Package names (e.g. vendor/package)
        #[arg(required = true)]
        packages: Vec<String>,

        /// Install path of the package, relative to the project root (single package only)
        #[arg(long, value_name = "DIR")]
        path: Option<PathBuf>,
    },

    /// Replace a package's assets with those of its new version
    Update {
        /// Package name
        package: String,

        /// Install path of the previous version
        #[arg(long, value_name = "DIR")]
        from_path: Option<PathBuf>,

        /// Install path of the new version
        #[arg(long, value_name = "DIR")]
        path: Option<PathBuf>,
    },

    /// Replay lifecycle events, one JSON object per line
    Apply {
        /// Event file ("-" reads stdin)
        #[arg(long, value_name = "FILE", default_value = "-")]
        events: PathBuf,
    },

    /// Show what a module configuration file declares
    Check {
        /// Path to a module configuration file
        config: PathBuf,
    },

    /// Remove tracked asset groups that no installed package declares
    Prune {
        /// Only list orphaned groups
        #[arg(long)]
        dry_run: bool,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
