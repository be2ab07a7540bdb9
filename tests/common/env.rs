//! Test environment for isolated asset-manager runs.
//!
//! Provides `TestEnv` - a temp project root (with `public/` and `vendor/`)
//! and a temp home, plus helpers to run the CLI against them.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

use super::fixtures::PHP_ASSET_CONFIG;

/// Result of running an asset-manager command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as one JSON value per line
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("stdout line is not JSON ({e}): {line}"))
            })
            .collect()
    }
}

/// Isolated project and home directories
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    /// Project with an empty `public/` directory
    pub fn new() -> Self {
        let env = Self::without_public();
        std::fs::create_dir_all(env.public_path("")).expect("Failed to create public dir");
        env
    }

    pub fn without_public() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create project dir"),
            home_dir: tempfile::tempdir().expect("Failed to create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_asset-manager")),
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn public_path(&self, relative: &str) -> PathBuf {
        self.project_path("public").join(relative)
    }

    /// Current public `.gitignore`, `None` when absent
    pub fn gitignore(&self) -> Option<String> {
        std::fs::read_to_string(self.public_path(".gitignore")).ok()
    }

    pub fn write_project_file(&self, relative: &str, content: &str) {
        write_file(&self.project_path(relative), content);
    }

    pub fn write_home_file(&self, relative: &str, content: &str) {
        write_file(&self.home_dir.path().join(relative), content);
    }

    /// `vendor/<name>` with `asset/<file>` contents and a legacy PHP config
    pub fn add_package(&self, name: &str, files: &[(&str, &str)]) {
        self.add_package_with_config(name, "module.config.php", PHP_ASSET_CONFIG, files);
    }

    /// `vendor/<name>` with `config/<config_file>` and `asset/<file>` contents
    pub fn add_package_with_config(
        &self,
        name: &str,
        config_file: &str,
        config: &str,
        files: &[(&str, &str)],
    ) {
        let root = format!("vendor/{name}");
        self.write_project_file(&format!("{root}/config/{config_file}"), config);
        for (relative, content) in files {
            self.write_project_file(&format!("{root}/asset/{relative}"), content);
        }
    }

    /// Record packages in `vendor/composer/installed.json` (Composer 2 layout)
    pub fn write_installed(&self, names: &[&str]) {
        let packages: Vec<_> = names
            .iter()
            .map(|name| serde_json::json!({ "name": name, "install-path": format!("../{name}") }))
            .collect();
        self.write_project_file(
            "vendor/composer/installed.json",
            &serde_json::json!({ "packages": packages }).to_string(),
        );
    }

    /// Run from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_stdin(args, None)
    }

    /// Run from the project root, feeding `input` on stdin
    pub fn run_with_stdin(&self, args: &[&str], input: Option<&str>) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env_remove("RUST_LOG")
            .env_remove("ASSET_MANAGER_PROJECT_ROOT")
            .env_remove("ASSET_MANAGER_PUBLIC_DIR")
            .env_remove("ASSET_MANAGER_DEFER_INSTALLS")
            .env_remove("ASSET_MANAGER_LEGACY_PHP")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().expect("Failed to execute asset-manager");
        {
            let mut stdin = child.stdin.take().expect("stdin is piped");
            if let Some(input) = input {
                stdin
                    .write_all(input.as_bytes())
                    .expect("Failed to write stdin");
            }
        }
        let output = child.wait_with_output().expect("Failed to wait for asset-manager");

        to_result(output)
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}
