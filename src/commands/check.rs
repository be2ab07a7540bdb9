//! Check command handler
//!
//! Runs a single module configuration file through the same gates and readers
//! the installer uses, and lists the groups each declared source would
//! publish. Never executes or copies anything.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::json;

use asset_manager::domain::ports::{ConfigLookup, FileSystem};
use asset_manager::domain::services::unsafe_config_message;
use asset_manager::infrastructure::{ConfigFormat, LocalFs, ModuleConfigLoader};

use super::context::Context;

#[derive(Debug, Serialize)]
struct SourceSummary {
    path: PathBuf,
    exists: bool,
    groups: Vec<String>,
}

pub fn cmd_check(ctx: &Context, config: &Path) -> Result<()> {
    let Some(format) = ConfigFormat::from_path(config) else {
        bail!(
            "unsupported configuration file: {} (expected .toml, .json, .yaml, .yml or .php)",
            config.display()
        );
    };

    let lookup = ModuleConfigLoader::new(true).load_file(config, format)?;
    let (status, sources) = match &lookup {
        ConfigLookup::Loaded(module) => match module.asset_paths() {
            Some(paths) => ("assets", summarize(&paths)),
            None => ("no_asset_paths", Vec::new()),
        },
        ConfigLookup::NotNeeded(_) | ConfigLookup::Missing => ("no_asset_manager_key", Vec::new()),
        ConfigLookup::Unsafe(_) => ("unsafe", Vec::new()),
        ConfigLookup::Malformed(_) => ("malformed", Vec::new()),
    };

    if ctx.json {
        println!(
            "{}",
            json!({
                "type": "check",
                "config": config,
                "status": status,
                "sources": sources,
            })
        );
    } else {
        match &lookup {
            ConfigLookup::Unsafe(path) => eprintln!("{}", unsafe_config_message(path)),
            ConfigLookup::Malformed(path) => {
                println!("{}: not a readable configuration", path.display())
            }
            _ if status == "assets" => print_sources(config, &sources),
            _ => println!("{}: declares no assets", config.display()),
        }
    }

    if matches!(lookup, ConfigLookup::Unsafe(_) | ConfigLookup::Malformed(_)) {
        bail!("{} cannot be used for asset publishing", config.display());
    }
    Ok(())
}

fn summarize(paths: &[PathBuf]) -> Vec<SourceSummary> {
    let fs = LocalFs::new();
    paths
        .iter()
        .map(|path| {
            let exists = fs.is_dir(path);
            let groups = if exists {
                fs.list_dirs(path).unwrap_or_default()
            } else {
                Vec::new()
            };
            SourceSummary {
                path: path.clone(),
                exists,
                groups,
            }
        })
        .collect()
}

fn print_sources(config: &Path, sources: &[SourceSummary]) {
    println!("{}: {} asset source(s)", config.display(), sources.len());
    for source in sources {
        if !source.exists {
            println!("  {} (missing)", source.path.display());
            continue;
        }
        println!("  {}", source.path.display());
        for group in &source.groups {
            println!("    {}/", group);
        }
    }
}
