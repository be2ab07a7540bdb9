//! Module configuration entity
//!
//! A package's configuration document reduced to a value tree. Only one key
//! path is ever read from it: `asset_manager.resolver_configs.paths`.

use std::path::{Path, PathBuf};

/// Key path holding the declared asset source directories
pub const ASSET_PATHS_KEY: [&str; 3] = ["asset_manager", "resolver_configs", "paths"];

/// Key of an associative entry
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigKey {
    Int(i64),
    Str(String),
}

/// Value in a module configuration document
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ConfigValue>),
    /// Ordered associative array; later duplicate keys replace earlier ones
    Map(Vec<(ConfigKey, ConfigValue)>),
    /// Expression that cannot be evaluated without running code
    Opaque,
}

impl ConfigValue {
    /// Look up a string key in a map
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            ConfigValue::Map(entries) => entries.iter().find_map(|(k, v)| match k {
                ConfigKey::Str(s) if s == key => Some(v),
                _ => None,
            }),
            _ => None,
        }
    }

    /// Follow a key path through nested maps
    pub fn get_path(&self, path: &[&str]) -> Option<&ConfigValue> {
        path.iter().try_fold(self, |value, key| value.get(key))
    }

    /// Values of a list or map, in order; `None` for scalars
    pub fn sequence(&self) -> Option<Vec<&ConfigValue>> {
        match self {
            ConfigValue::List(items) => Some(items.iter().collect()),
            ConfigValue::Map(entries) => Some(entries.iter().map(|(_, v)| v).collect()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Insert into a map, replacing an existing entry with the same key
    pub fn insert(entries: &mut Vec<(ConfigKey, ConfigValue)>, key: ConfigKey, value: ConfigValue) {
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => entries.push((key, value)),
        }
    }
}

/// Parsed configuration of one package
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleConfig {
    source: PathBuf,
    root: ConfigValue,
}

impl ModuleConfig {
    pub fn new(source: impl Into<PathBuf>, root: ConfigValue) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }

    /// File the configuration was read from
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn root(&self) -> &ConfigValue {
        &self.root
    }

    /// Declared asset source directories.
    ///
    /// Returns `None` when the document is not a map or the key path is
    /// missing or not a sequence. Non-string entries are skipped, duplicates
    /// are kept, and relative paths resolve against the config file's
    /// directory.
    pub fn asset_paths(&self) -> Option<Vec<PathBuf>> {
        let paths = self.root.get_path(&ASSET_PATHS_KEY)?.sequence()?;
        let base = self.source.parent().unwrap_or_else(|| Path::new(""));

        Some(
            paths
                .into_iter()
                .filter_map(ConfigValue::as_str)
                .map(|p| {
                    let path = Path::new(p);
                    if path.is_absolute() {
                        path.to_path_buf()
                    } else {
                        base.join(path)
                    }
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: Vec<(&str, ConfigValue)>) -> ConfigValue {
        ConfigValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (ConfigKey::Str(k.to_string()), v))
                .collect(),
        )
    }

    fn config_with_paths(paths: ConfigValue) -> ModuleConfig {
        ModuleConfig::new(
            "/pkg/config/module.config.php",
            map(vec![(
                "asset_manager",
                map(vec![("resolver_configs", map(vec![("paths", paths)]))]),
            )]),
        )
    }

    #[test]
    fn asset_paths_reads_nested_key() {
        let config = config_with_paths(ConfigValue::List(vec![
            ConfigValue::Str("/pkg/asset".to_string()),
            ConfigValue::Str("/pkg/asset".to_string()),
        ]));
        assert_eq!(
            config.asset_paths().unwrap(),
            vec![PathBuf::from("/pkg/asset"), PathBuf::from("/pkg/asset")]
        );
    }

    #[test]
    fn asset_paths_resolves_relative_entries_against_config_dir() {
        let config = config_with_paths(ConfigValue::List(vec![ConfigValue::Str(
            "../asset".to_string(),
        )]));
        assert_eq!(
            config.asset_paths().unwrap(),
            vec![PathBuf::from("/pkg/config/../asset")]
        );
    }

    #[test]
    fn asset_paths_accepts_associative_arrays_and_skips_non_strings() {
        let config = config_with_paths(ConfigValue::Map(vec![
            (ConfigKey::Str("main".into()), ConfigValue::Str("/a".into())),
            (ConfigKey::Int(0), ConfigValue::Int(3)),
            (ConfigKey::Int(1), ConfigValue::Opaque),
        ]));
        assert_eq!(config.asset_paths().unwrap(), vec![PathBuf::from("/a")]);
    }

    #[test]
    fn asset_paths_none_for_scalar_or_missing() {
        assert!(config_with_paths(ConfigValue::Str("/a".into()))
            .asset_paths()
            .is_none());
        assert!(config_with_paths(ConfigValue::Null).asset_paths().is_none());
        let empty = ModuleConfig::new("/x.php", ConfigValue::Map(vec![]));
        assert!(empty.asset_paths().is_none());
        let not_map = ModuleConfig::new("/x.php", ConfigValue::Opaque);
        assert!(not_map.asset_paths().is_none());
    }

    #[test]
    fn insert_replaces_duplicate_keys() {
        let mut entries = Vec::new();
        ConfigValue::insert(&mut entries, ConfigKey::Int(0), ConfigValue::Int(1));
        ConfigValue::insert(&mut entries, ConfigKey::Int(0), ConfigValue::Int(2));
        assert_eq!(entries, vec![(ConfigKey::Int(0), ConfigValue::Int(2))]);
    }
}
