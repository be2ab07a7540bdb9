//! Package entity

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A dependency package, owned by the host package manager.
///
/// Only the name is required; the install path is resolved through an
/// [`InstallPathResolver`](crate::domain::ports::InstallPathResolver) unless
/// the host already knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(
        default,
        rename = "install-path",
        alias = "install_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub install_path: Option<PathBuf>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            install_path: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_install_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.install_path = Some(path.into());
        self
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} ({})", self.name, version),
            None => f.write_str(&self.name),
        }
    }
}
