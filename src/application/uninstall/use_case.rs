//! Uninstall Use Case
//!
//! Deletes tracked asset groups and drops their `.gitignore` lines.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::sources::declared_sources;
use crate::domain::entities::{GitignoreLines, Package};
use crate::domain::ports::{
    DiagnosticSink, FileSystem, GitignoreStore, ModuleConfigSource, WriteBack,
};
use crate::domain::value_objects::{AssetGroup, SkipReason};
use crate::error::{AssetError, AssetResult};

use super::options::UninstallOptions;
use super::result::{KeepReason, UninstallReport};

/// Uninstall use case - removes the asset groups a package published
pub struct UninstallUseCase<FS, GS, CS>
where
    FS: FileSystem,
    GS: GitignoreStore,
    CS: ModuleConfigSource,
{
    fs: FS,
    gitignore: GS,
    configs: CS,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl<FS, GS, CS> UninstallUseCase<FS, GS, CS>
where
    FS: FileSystem,
    GS: GitignoreStore,
    CS: ModuleConfigSource,
{
    /// Create a new uninstall use case
    pub fn new(fs: FS, gitignore: GS, configs: CS, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            fs,
            gitignore,
            configs,
            diagnostics,
        }
    }

    /// Remove every declared group that is both tracked and present.
    ///
    /// The `.gitignore` is loaded once and written back once, even when
    /// nothing was removed. A failed removal stops the run; lines for groups
    /// already removed are still dropped.
    pub fn execute(
        &self,
        package: &Package,
        install_path: &Path,
        options: &UninstallOptions,
    ) -> AssetResult<UninstallReport> {
        let report = UninstallReport::new(&package.name);

        if !self.fs.is_dir(&options.public_dir) {
            debug!(package = %package.name, "no public directory");
            return Ok(report.skipped(SkipReason::NoPublicDirectory));
        }

        let gitignore_path = options.gitignore_path();
        if !self.gitignore.exists(&gitignore_path) {
            debug!(package = %package.name, "no public .gitignore");
            return Ok(report.skipped(SkipReason::NoGitignore));
        }

        let sources =
            match declared_sources(&self.configs, self.diagnostics.as_ref(), install_path)? {
                Ok(sources) => sources,
                Err(reason) => return Ok(report.skipped(reason)),
            };

        let mut report = UninstallReport {
            config: Some(sources.config),
            ..report
        };

        self.gitignore
            .update(&gitignore_path, WriteBack::Always, |lines| {
                sources.paths.iter().try_for_each(|source| {
                    self.remove_groups(source, lines, &options.public_dir, &mut report)
                })
            })??;

        Ok(report)
    }

    fn remove_groups(
        &self,
        source: &Path,
        lines: &mut GitignoreLines,
        public_dir: &Path,
        report: &mut UninstallReport,
    ) -> AssetResult<()> {
        if !self.fs.is_dir(source) {
            debug!(source = %source.display(), "asset source is not a directory");
            return Ok(());
        }
        let names = match self.fs.list_dirs(source) {
            Ok(names) => names,
            Err(e) => {
                debug!(source = %source.display(), error = %e, "cannot list asset source");
                return Ok(());
            }
        };

        for group in names.into_iter().filter_map(|n| AssetGroup::new(n).ok()) {
            if !lines.contains(&group) {
                report.keep(group, KeepReason::NotTracked);
                continue;
            }

            let target = public_dir.join(group.as_str());
            if !self.fs.is_dir(&target) {
                report.keep(group, KeepReason::NotPresent);
                continue;
            }

            self.fs
                .remove_tree(&target)
                .map_err(|e| AssetError::Remove {
                    path: target.clone(),
                    source: e,
                })?;
            lines.remove_entry(&group);

            info!(package = %report.package, %group, "removed asset group");
            report.removed.push(group);
        }

        Ok(())
    }
}
