//! Uninstall Use Case Tests

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::*;
use crate::application::install::InstallOptions;
use crate::application::test_support::Project;
use crate::domain::entities::Package;
use crate::domain::ports::{FileSystem, FsError, FsResult, NoopDiagnostics};
use crate::domain::value_objects::SkipReason;
use crate::error::AssetError;
use crate::infrastructure::{LocalFs, LockedGitignoreStore, ModuleConfigLoader};

fn uninstall(project: &Project, name: &str) -> UninstallReport {
    project
        .uninstaller()
        .execute(
            &Package::new(name),
            &project.install_path(name),
            &UninstallOptions::new(project.public()),
        )
        .unwrap()
}

fn install(project: &Project, name: &str) {
    project
        .installer()
        .execute(
            &Package::new(name),
            &project.install_path(name),
            &InstallOptions::new(project.public()),
        )
        .unwrap();
}

fn group_names(groups: &[crate::domain::value_objects::AssetGroup]) -> Vec<&str> {
    groups.iter().map(|g| g.as_str()).collect()
}

#[test]
fn removes_only_tracked_groups() {
    let project = Project::new();
    project.package_with_assets("org/pkg", &[("groupA/a.txt", "a"), ("groupB/b.txt", "b")]);
    fs::create_dir_all(project.public().join("groupA")).unwrap();
    fs::create_dir_all(project.public().join("groupB")).unwrap();
    fs::write(project.public().join("groupB/user.txt"), "mine").unwrap();
    fs::write(project.gitignore_path(), "groupA/").unwrap();

    let report = uninstall(&project, "org/pkg");

    assert_eq!(group_names(&report.removed), vec!["groupA"]);
    assert_eq!(
        report.kept,
        vec![KeptGroup {
            group: crate::domain::value_objects::AssetGroup::new("groupB").unwrap(),
            reason: KeepReason::NotTracked,
        }]
    );
    assert!(!project.public().join("groupA").exists());
    assert!(project.public().join("groupB/user.txt").exists());
    assert_eq!(project.gitignore().unwrap(), "");
}

#[test]
fn install_then_uninstall_restores_public_dir() {
    let project = Project::new();
    fs::write(project.gitignore_path(), "# project rules\n*.log\n").unwrap();
    fs::write(project.public().join("index.php"), "<?php").unwrap();
    project.package_with_assets(
        "org/pkg",
        &[("one/a.css", "a"), ("two/nested/b.js", "b")],
    );
    let before_files = project.public_files();
    let before_gitignore = project.gitignore();

    install(&project, "org/pkg");
    assert_ne!(project.public_files(), before_files);
    uninstall(&project, "org/pkg");

    assert_eq!(project.public_files(), before_files);
    assert_eq!(project.gitignore(), before_gitignore);
}

#[test]
fn round_trip_from_missing_gitignore_leaves_empty_file() {
    let project = Project::new();
    project.package_with_assets("org/pkg", &[("group/a.txt", "a")]);

    install(&project, "org/pkg");
    uninstall(&project, "org/pkg");

    assert_eq!(project.gitignore().unwrap(), "");
    assert_eq!(project.public_files(), vec![".gitignore"]);
}

#[test]
fn tracked_but_missing_directory_is_kept() {
    let project = Project::new();
    project.package_with_assets("org/pkg", &[("group/a.txt", "a")]);
    fs::write(project.gitignore_path(), "group/").unwrap();

    let report = uninstall(&project, "org/pkg");

    assert!(report.removed.is_empty());
    assert_eq!(report.kept[0].reason, KeepReason::NotPresent);
    assert_eq!(project.gitignore().unwrap(), "group/");
}

#[test]
fn gitignore_is_rewritten_even_without_changes() {
    let project = Project::new();
    project.package_with_assets("org/pkg", &[("group/a.txt", "a")]);
    fs::write(project.gitignore_path(), "a/\r\nb/").unwrap();

    uninstall(&project, "org/pkg");

    assert_eq!(project.gitignore().unwrap(), "a/\nb/");
}

#[test]
fn only_one_duplicate_line_is_removed() {
    let project = Project::new();
    project.package_with_assets("org/pkg", &[("group/a.txt", "a")]);
    fs::create_dir_all(project.public().join("group")).unwrap();
    fs::write(project.gitignore_path(), "group/\nother\ngroup/").unwrap();

    uninstall(&project, "org/pkg");

    assert_eq!(project.gitignore().unwrap(), "other\ngroup/");
}

#[test]
fn missing_public_dir_or_gitignore_is_a_noop() {
    let without_public = Project::without_public();
    without_public.package_with_assets("org/pkg", &[("group/a.txt", "a")]);
    assert_eq!(
        uninstall(&without_public, "org/pkg").skipped,
        Some(SkipReason::NoPublicDirectory)
    );

    let without_gitignore = Project::new();
    without_gitignore.package_with_assets("org/pkg", &[("group/a.txt", "a")]);
    fs::create_dir_all(without_gitignore.public().join("group")).unwrap();
    assert_eq!(
        uninstall(&without_gitignore, "org/pkg").skipped,
        Some(SkipReason::NoGitignore)
    );
    assert!(without_gitignore.public().join("group").exists());
    assert!(without_gitignore.gitignore().is_none());
}

#[test]
fn unsafe_config_is_never_read() {
    let project = Project::new();
    project.package_with_assets("org/pkg", &[("group/a.txt", "a")]);
    fs::create_dir_all(project.public().join("group")).unwrap();
    fs::write(project.gitignore_path(), "group/").unwrap();
    project.php_config(
        "org/pkg",
        "<?php eval('1;'); return ['asset_manager' => ['resolver_configs' => ['paths' => [__DIR__ . '/../asset']]]];",
    );

    let report = uninstall(&project, "org/pkg");

    assert_eq!(report.skipped, Some(SkipReason::UnsafeConfig));
    assert_eq!(project.diagnostics.messages().len(), 1);
    assert!(project.public().join("group").exists());
    assert_eq!(project.gitignore().unwrap(), "group/");
}

/// Local filesystem whose removals fail for one group
struct FailingRemoveFs {
    fail_on: PathBuf,
}

impl FileSystem for FailingRemoveFs {
    fn is_dir(&self, path: &Path) -> bool {
        LocalFs.is_dir(path)
    }

    fn list_dirs(&self, path: &Path) -> FsResult<Vec<String>> {
        LocalFs.list_dirs(path)
    }

    fn list_files(&self, root: &Path) -> FsResult<Vec<PathBuf>> {
        LocalFs.list_files(root)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> FsResult<()> {
        LocalFs.copy_file(from, to)
    }

    fn remove_tree(&self, path: &Path) -> FsResult<()> {
        if path == self.fail_on {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        LocalFs.remove_tree(path)
    }
}

#[test]
fn removal_failure_keeps_lines_for_groups_left_behind() {
    let project = Project::new();
    project.package_with_assets("org/pkg", &[("alpha/a.txt", "a"), ("beta/b.txt", "b")]);
    fs::create_dir_all(project.public().join("alpha")).unwrap();
    fs::create_dir_all(project.public().join("beta")).unwrap();
    fs::write(project.gitignore_path(), "alpha/\nbeta/").unwrap();

    let uninstaller = UninstallUseCase::new(
        FailingRemoveFs {
            fail_on: project.public().join("beta"),
        },
        LockedGitignoreStore::new(),
        ModuleConfigLoader::default(),
        Arc::new(NoopDiagnostics),
    );
    let err = uninstaller
        .execute(
            &Package::new("org/pkg"),
            &project.install_path("org/pkg"),
            &UninstallOptions::new(project.public()),
        )
        .unwrap_err();

    assert!(matches!(err, AssetError::Remove { .. }));
    assert!(!project.public().join("alpha").exists());
    assert_eq!(project.gitignore().unwrap(), "beta/");
}
