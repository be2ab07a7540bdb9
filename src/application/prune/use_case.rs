//! Prune Use Case

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::sources::declared_sources;
use crate::domain::entities::Package;
use crate::domain::ports::{
    DiagnosticSink, FileSystem, GitignoreStore, InstallPathResolver, ModuleConfigSource,
    WriteBack,
};
use crate::domain::value_objects::{AssetGroup, SkipReason};
use crate::error::{AssetError, AssetResult};

use super::options::PruneOptions;
use super::result::PruneReport;

/// Prune use case - removes asset groups left behind by departed packages
pub struct PruneUseCase<FS, GS, CS, R>
where
    FS: FileSystem,
    GS: GitignoreStore,
    CS: ModuleConfigSource,
    R: InstallPathResolver,
{
    fs: FS,
    gitignore: GS,
    configs: CS,
    resolver: R,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl<FS, GS, CS, R> PruneUseCase<FS, GS, CS, R>
where
    FS: FileSystem,
    GS: GitignoreStore,
    CS: ModuleConfigSource,
    R: InstallPathResolver,
{
    pub fn new(
        fs: FS,
        gitignore: GS,
        configs: CS,
        resolver: R,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            fs,
            gitignore,
            configs,
            resolver,
            diagnostics,
        }
    }

    /// Compare `.gitignore` group entries with what `installed` declares.
    ///
    /// Only `name/` lines count as group entries, so hand-written rules are
    /// never touched.
    pub fn execute(&self, installed: &[Package], options: &PruneOptions) -> AssetResult<PruneReport> {
        let report = PruneReport {
            dry_run: options.dry_run,
            ..PruneReport::default()
        };

        if !self.fs.is_dir(&options.public_dir) {
            return Ok(report.skipped(SkipReason::NoPublicDirectory));
        }
        let gitignore_path = options.gitignore_path();
        if !self.gitignore.exists(&gitignore_path) {
            return Ok(report.skipped(SkipReason::NoGitignore));
        }

        let mut report = report;
        let declared = self.declared_groups(installed, &mut report)?;

        let mut seen = BTreeSet::new();
        report.orphans = self
            .gitignore
            .load(&gitignore_path)?
            .group_entries()
            .filter(|group| !declared.contains(group))
            .filter(|group| self.fs.is_dir(&options.public_dir.join(group.as_str())))
            .filter(|group| seen.insert(group.clone()))
            .collect();

        if !report.unreadable.is_empty() {
            warn!(
                packages = report.unreadable.len(),
                "some package configurations are unreadable; not deleting orphans"
            );
            report.dry_run = true;
        }
        if report.dry_run || report.orphans.is_empty() {
            return Ok(report);
        }

        let orphans = report.orphans.clone();
        self.gitignore
            .update(&gitignore_path, WriteBack::Always, |lines| {
                orphans.iter().try_for_each(|group| -> AssetResult<()> {
                    if !lines.contains(group) {
                        return Ok(());
                    }
                    let target = options.public_dir.join(group.as_str());
                    self.fs
                        .remove_tree(&target)
                        .map_err(|e| AssetError::Remove {
                            path: target.clone(),
                            source: e,
                        })?;
                    lines.remove_entry(group);
                    info!(%group, "pruned orphaned asset group");
                    report.removed.push(group.clone());
                    Ok(())
                })
            })??;

        Ok(report)
    }

    /// Every group any installed package declares
    fn declared_groups(
        &self,
        installed: &[Package],
        report: &mut PruneReport,
    ) -> AssetResult<BTreeSet<AssetGroup>> {
        let mut declared = BTreeSet::new();

        for package in installed {
            let install_path = self.resolver.install_path(package)?;
            let sources =
                match declared_sources(&self.configs, self.diagnostics.as_ref(), &install_path)? {
                    Ok(sources) => sources,
                    Err(SkipReason::UnsafeConfig) => {
                        report.unreadable.push(package.name.clone());
                        continue;
                    }
                    Err(reason) => {
                        debug!(package = %package.name, %reason, "declares no assets");
                        continue;
                    }
                };

            for source in &sources.paths {
                if !self.fs.is_dir(source) {
                    continue;
                }
                let names = self.fs.list_dirs(source).unwrap_or_default();
                declared.extend(names.into_iter().filter_map(|n| AssetGroup::new(n).ok()));
            }
        }

        Ok(declared)
    }
}
