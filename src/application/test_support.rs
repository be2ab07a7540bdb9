//! Fixtures shared by the use case tests

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crate::domain::ports::RecordingDiagnostics;
use crate::infrastructure::{LocalFs, LockedGitignoreStore, ModuleConfigLoader};

use super::{InstallUseCase, UninstallUseCase};

pub(crate) type LocalInstaller = InstallUseCase<LocalFs, LockedGitignoreStore, ModuleConfigLoader>;
pub(crate) type LocalUninstaller =
    UninstallUseCase<LocalFs, LockedGitignoreStore, ModuleConfigLoader>;

/// A project directory with an optional `public/` and packages under `vendor/`
pub(crate) struct Project {
    dir: TempDir,
    pub diagnostics: Arc<RecordingDiagnostics>,
}

impl Project {
    pub fn new() -> Self {
        let project = Self::without_public();
        fs::create_dir_all(project.public()).unwrap();
        project
    }

    pub fn without_public() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            diagnostics: Arc::new(RecordingDiagnostics::new()),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn public(&self) -> PathBuf {
        self.root().join("public")
    }

    pub fn gitignore_path(&self) -> PathBuf {
        self.public().join(".gitignore")
    }

    /// Current `.gitignore` text, `None` when absent
    pub fn gitignore(&self) -> Option<String> {
        fs::read_to_string(self.gitignore_path()).ok()
    }

    pub fn install_path(&self, name: &str) -> PathBuf {
        self.root().join("vendor").join(name)
    }

    /// Write `config/module.config.php` for a package
    pub fn php_config(&self, name: &str, source: &str) -> PathBuf {
        let config = self.install_path(name).join("config/module.config.php");
        fs::create_dir_all(config.parent().unwrap()).unwrap();
        fs::write(&config, source).unwrap();
        config
    }

    /// A package shipping `asset/<group>/<file>` trees declared through `__DIR__`
    pub fn package_with_assets(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let install = self.install_path(name);
        for (relative, content) in files {
            let path = install.join("asset").join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        self.php_config(
            name,
            "<?php\nreturn [\n    'asset_manager' => [\n        'resolver_configs' => [\n            'paths' => [\n                __DIR__ . '/../asset',\n            ],\n        ],\n    ],\n];\n",
        );
        install
    }

    pub fn installer(&self) -> LocalInstaller {
        InstallUseCase::new(
            LocalFs::new(),
            LockedGitignoreStore::new(),
            ModuleConfigLoader::default(),
            self.diagnostics.clone(),
        )
    }

    pub fn uninstaller(&self) -> LocalUninstaller {
        UninstallUseCase::new(
            LocalFs::new(),
            LockedGitignoreStore::new(),
            ModuleConfigLoader::default(),
            self.diagnostics.clone(),
        )
    }

    /// Relative paths of every file under `public/`, sorted
    pub fn public_files(&self) -> Vec<String> {
        let mut files = Vec::new();
        collect(&self.public(), &self.public(), &mut files);
        files.sort();
        files
    }
}

fn collect(root: &Path, dir: &Path, files: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).unwrap();
            files.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
}
