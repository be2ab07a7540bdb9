//! Module configuration loader
//!
//! Finds `config/module.config.*` under a package's install path. Declarative
//! formats are deserialized with serde; the legacy PHP form goes through the
//! safety gate and the static reader and is never executed.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::{ConfigKey, ConfigValue, ModuleConfig};
use crate::domain::ports::{ConfigLookup, ModuleConfigSource};
use crate::domain::services::{evaluate_return, ConfigSafetyChecker, SafetyVerdict};
use crate::error::{AssetError, AssetResult};

/// Directory inside a package that holds its configuration
pub const CONFIG_DIR: &str = "config";

/// Supported file formats, in lookup order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
    Php,
}

impl ConfigFormat {
    const LOOKUP: [(&'static str, ConfigFormat); 5] = [
        ("module.config.toml", ConfigFormat::Toml),
        ("module.config.json", ConfigFormat::Json),
        ("module.config.yaml", ConfigFormat::Yaml),
        ("module.config.yml", ConfigFormat::Yaml),
        ("module.config.php", ConfigFormat::Php),
    ];

    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "php" => Some(ConfigFormat::Php),
            _ => None,
        }
    }
}

/// Filesystem-backed [`ModuleConfigSource`]
#[derive(Debug, Clone, Copy)]
pub struct ModuleConfigLoader {
    legacy_php: bool,
    checker: ConfigSafetyChecker,
}

impl Default for ModuleConfigLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ModuleConfigLoader {
    /// `legacy_php` controls whether `module.config.php` files are considered
    pub fn new(legacy_php: bool) -> Self {
        Self {
            legacy_php,
            checker: ConfigSafetyChecker::new(),
        }
    }

    /// First existing configuration file under `install_path`
    pub fn locate(&self, install_path: &Path) -> Option<(PathBuf, ConfigFormat)> {
        let dir = install_path.join(CONFIG_DIR);
        ConfigFormat::LOOKUP
            .iter()
            .filter(|(_, format)| self.legacy_php || *format != ConfigFormat::Php)
            .map(|(name, format)| (dir.join(name), *format))
            .find(|(path, _)| path.is_file())
    }

    /// Read one configuration file of a known format
    pub fn load_file(&self, path: &Path, format: ConfigFormat) -> AssetResult<ConfigLookup> {
        let bytes = std::fs::read(path).map_err(|e| AssetError::io(path, e))?;

        let root = match format {
            ConfigFormat::Php => {
                // PHP sources need not be UTF-8
                let source = String::from_utf8_lossy(&bytes);
                match self.checker.check_source(path, &source) {
                    Ok(SafetyVerdict::NotNeeded) => {
                        return Ok(ConfigLookup::NotNeeded(path.to_path_buf()))
                    }
                    Ok(SafetyVerdict::Unsafe) => {
                        return Ok(ConfigLookup::Unsafe(path.to_path_buf()))
                    }
                    Ok(SafetyVerdict::Parseable) => evaluate_return(&source, path)
                        .map_err(|e| e.to_string())
                        .and_then(|value| value.ok_or_else(|| "no top-level return".to_string())),
                    Err(AssetError::Lex { line, message, .. }) => {
                        Err(format!("line {line}: {message}"))
                    }
                    Err(e) => return Err(e),
                }
            }
            ConfigFormat::Toml => std::str::from_utf8(&bytes)
                .map_err(|e| e.to_string())
                .and_then(|source| {
                    toml::from_str::<toml::Value>(source).map_err(|e| e.to_string())
                })
                .map(from_toml),
            ConfigFormat::Json => serde_json::from_slice::<serde_json::Value>(&bytes)
                .map(from_json)
                .map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml_ng::from_slice::<serde_yaml_ng::Value>(&bytes)
                .map(from_yaml)
                .map_err(|e| e.to_string()),
        };

        match root {
            Ok(root) => Ok(ConfigLookup::Loaded(ModuleConfig::new(path, root))),
            Err(message) => {
                debug!(path = %path.display(), %message, "malformed module configuration");
                Ok(ConfigLookup::Malformed(path.to_path_buf()))
            }
        }
    }
}

impl ModuleConfigSource for ModuleConfigLoader {
    fn lookup(&self, install_path: &Path) -> AssetResult<ConfigLookup> {
        match self.locate(install_path) {
            Some((path, format)) => self.load_file(&path, format),
            None => Ok(ConfigLookup::Missing),
        }
    }
}

fn from_toml(value: toml::Value) -> ConfigValue {
    match value {
        toml::Value::String(s) => ConfigValue::Str(s),
        toml::Value::Integer(n) => ConfigValue::Int(n),
        toml::Value::Float(f) => ConfigValue::Float(f),
        toml::Value::Boolean(b) => ConfigValue::Bool(b),
        toml::Value::Datetime(d) => ConfigValue::Str(d.to_string()),
        toml::Value::Array(items) => ConfigValue::List(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => ConfigValue::Map(
            table
                .into_iter()
                .map(|(k, v)| (ConfigKey::Str(k), from_toml(v)))
                .collect(),
        ),
    }
}

fn from_json(value: serde_json::Value) -> ConfigValue {
    match value {
        serde_json::Value::Null => ConfigValue::Null,
        serde_json::Value::Bool(b) => ConfigValue::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => ConfigValue::Int(i),
            None => n.as_f64().map_or(ConfigValue::Opaque, ConfigValue::Float),
        },
        serde_json::Value::String(s) => ConfigValue::Str(s),
        serde_json::Value::Array(items) => {
            ConfigValue::List(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(map) => ConfigValue::Map(
            map.into_iter()
                .map(|(k, v)| (ConfigKey::Str(k), from_json(v)))
                .collect(),
        ),
    }
}

fn from_yaml(value: serde_yaml_ng::Value) -> ConfigValue {
    use serde_yaml_ng::Value;

    match value {
        Value::Null => ConfigValue::Null,
        Value::Bool(b) => ConfigValue::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ConfigValue::Int(i),
            None => n.as_f64().map_or(ConfigValue::Opaque, ConfigValue::Float),
        },
        Value::String(s) => ConfigValue::Str(s),
        Value::Sequence(items) => ConfigValue::List(items.into_iter().map(from_yaml).collect()),
        Value::Mapping(mapping) => {
            let mut entries = Vec::new();
            for (k, v) in mapping {
                let key = match k {
                    Value::String(s) => ConfigKey::Str(s),
                    Value::Number(n) => match n.as_i64() {
                        Some(i) => ConfigKey::Int(i),
                        None => ConfigKey::Str(n.to_string()),
                    },
                    Value::Bool(b) => ConfigKey::Str(b.to_string()),
                    _ => continue,
                };
                ConfigValue::insert(&mut entries, key, from_yaml(v));
            }
            ConfigValue::Map(entries)
        }
        Value::Tagged(tagged) => from_yaml(tagged.value),
    }
}
