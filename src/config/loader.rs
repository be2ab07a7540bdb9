//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AssetError, AssetResult};

use super::types::Settings;

/// Project-level settings file, relative to the project root
pub const PROJECT_CONFIG_FILE: &str = "asset-manager.toml";

pub const ENV_PROJECT_ROOT: &str = "ASSET_MANAGER_PROJECT_ROOT";
pub const ENV_PUBLIC_DIR: &str = "ASSET_MANAGER_PUBLIC_DIR";
pub const ENV_DEFER_INSTALLS: &str = "ASSET_MANAGER_DEFER_INSTALLS";
pub const ENV_LEGACY_PHP: &str = "ASSET_MANAGER_LEGACY_PHP";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Inputs that sit above the configuration files
#[derive(Debug, Clone, Default)]
pub struct LoadRequest {
    /// `--project-root`
    pub project_root: Option<PathBuf>,
    /// `--defer`; only ever turns deferral on
    pub defer_installs: bool,
    /// User config file; `None` uses the platform location
    pub user_config: Option<PathBuf>,
}

/// Settings with everything that went into them
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub project_root: PathBuf,
    /// Files that contributed, lowest priority first
    pub sources: Vec<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

impl LoadedSettings {
    pub fn public_dir(&self) -> PathBuf {
        self.settings.public_dir(&self.project_root)
    }

    pub fn vendor_dir(&self) -> PathBuf {
        self.settings.vendor_dir(&self.project_root)
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> AssetResult<(Settings, Vec<ConfigWarning>)> {
    let (table, warnings) = read_table(path)?;
    let settings = from_table(table, path)?;
    Ok((settings, warnings))
}

/// Resolve the project root and load every settings layer
pub fn load_layered(request: &LoadRequest) -> AssetResult<LoadedSettings> {
    let project_root = match &request.project_root {
        Some(root) => root.clone(),
        None => match std::env::var_os(ENV_PROJECT_ROOT) {
            Some(root) => PathBuf::from(root),
            None => std::env::current_dir().map_err(|e| AssetError::io(".", e))?,
        },
    };

    let user_config = request.user_config.clone().or_else(user_config_path);
    let candidates = user_config
        .into_iter()
        .chain(std::iter::once(project_root.join(PROJECT_CONFIG_FILE)));

    let mut merged = toml::Table::new();
    let mut sources = Vec::new();
    let mut warnings = Vec::new();
    let mut last_path = project_root.join(PROJECT_CONFIG_FILE);

    for path in candidates {
        if !path.is_file() {
            continue;
        }
        let (table, file_warnings) = read_table(&path)?;
        merge_tables(&mut merged, table);
        warnings.extend(file_warnings);
        sources.push(path.clone());
        last_path = path;
    }

    let mut settings = with_env_overrides(from_table(merged, &last_path)?);
    if request.defer_installs {
        settings.orchestrator.defer_installs = true;
    }

    Ok(LoadedSettings {
        settings,
        project_root,
        sources,
        warnings,
    })
}

/// Apply environment variable overrides (ASSET_MANAGER_* prefix)
fn with_env_overrides(settings: Settings) -> Settings {
    apply_env(settings, |key| std::env::var(key).ok())
}

pub(super) fn apply_env(mut settings: Settings, var: impl Fn(&str) -> Option<String>) -> Settings {
    // ASSET_MANAGER_PUBLIC_DIR
    if let Some(dir) = var(ENV_PUBLIC_DIR).filter(|d| !d.is_empty()) {
        settings.project.public_dir = PathBuf::from(dir);
    }

    // ASSET_MANAGER_DEFER_INSTALLS
    if let Some(val) = var(ENV_DEFER_INSTALLS) {
        settings.orchestrator.defer_installs = parse_flag(&val);
    }

    // ASSET_MANAGER_LEGACY_PHP
    if let Some(val) = var(ENV_LEGACY_PHP) {
        settings.modules.legacy_php = parse_flag(&val);
    }

    settings
}

fn parse_flag(val: &str) -> bool {
    val.to_lowercase() != "false" && val != "0"
}

/// `<config dir>/asset-manager/config.toml`, honouring `XDG_CONFIG_HOME`
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("asset-manager/config.toml"))
}

/// Parse one file, collecting keys `Settings` does not know
fn read_table(path: &Path) -> AssetResult<(toml::Table, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
    let config_error = |message: String| AssetError::Config {
        file: path.to_path_buf(),
        message,
    };

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);
    let _: Settings = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| config_error(e.to_string()))?;

    let table: toml::Table = toml::from_str(&content).map_err(|e| config_error(e.to_string()))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((table, warnings))
}

fn from_table(table: toml::Table, path: &Path) -> AssetResult<Settings> {
    toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| AssetError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Overlay `overlay` onto `base`; nested tables merge, everything else replaces
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(nested)) => {
                merge_tables(existing, nested);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "project",
        "public_dir",
        "vendor_dir",
        "modules",
        "legacy_php",
        "orchestrator",
        "defer_installs",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
