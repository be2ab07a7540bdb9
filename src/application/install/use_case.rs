//! Install Use Case
//!
//! Copies asset groups and records them in the public `.gitignore`.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::sources::declared_sources;
use crate::domain::entities::Package;
use crate::domain::ports::{
    DiagnosticSink, FileSystem, GitignoreStore, ModuleConfigSource, WriteBack,
};
use crate::domain::value_objects::{AssetGroup, SkipReason};
use crate::error::{AssetError, AssetResult};

use super::options::InstallOptions;
use super::result::InstallReport;

/// Install use case - publishes a package's declared asset groups
pub struct InstallUseCase<FS, GS, CS>
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

impl<FS, GS, CS> InstallUseCase<FS, GS, CS>
where
    FS: FileSystem,
    GS: GitignoreStore,
    CS: ModuleConfigSource,
{
    /// Create a new install use case
    pub fn new(fs: FS, gitignore: GS, configs: CS, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            fs,
            gitignore,
            configs,
            diagnostics,
        }
    }

    /// Copy every asset group declared by `package` into the public directory.
    ///
    /// Absent prerequisites make the run a no-op with a skip reason. Each group
    /// gets its own `.gitignore` read-modify-write after its files are copied.
    pub fn execute(
        &self,
        package: &Package,
        install_path: &Path,
        options: &InstallOptions,
    ) -> AssetResult<InstallReport> {
        let report = InstallReport::new(&package.name);

        if !self.fs.is_dir(&options.public_dir) {
            debug!(package = %package.name, "no public directory");
            return Ok(report.skipped(SkipReason::NoPublicDirectory));
        }

        let sources =
            match declared_sources(&self.configs, self.diagnostics.as_ref(), install_path)? {
                Ok(sources) => sources,
                Err(reason) => return Ok(report.skipped(reason)),
            };

        let mut report = InstallReport {
            config: Some(sources.config),
            ..report
        };
        let gitignore_path = options.gitignore_path();

        for source in &sources.paths {
            for group in self.groups_in(source) {
                let copied = self.copy_group(source, &group, &options.public_dir)?;
                let added = self
                    .gitignore
                    .update(&gitignore_path, WriteBack::IfChanged, |lines| {
                        lines.add_entry(&group)
                    })?;

                info!(package = %package.name, %group, files = copied, "published asset group");
                report.files_copied += copied;
                if added {
                    report.entries_added.push(group.clone());
                }
                report.groups.push(group);
            }
        }

        Ok(report)
    }

    /// Immediate subdirectories of a source, in name order.
    ///
    /// Missing or unreadable sources yield nothing.
    fn groups_in(&self, source: &Path) -> Vec<AssetGroup> {
        if !self.fs.is_dir(source) {
            debug!(source = %source.display(), "asset source is not a directory");
            return Vec::new();
        }
        match self.fs.list_dirs(source) {
            Ok(names) => names
                .into_iter()
                .filter_map(|name| AssetGroup::new(name).ok())
                .collect(),
            Err(e) => {
                debug!(source = %source.display(), error = %e, "cannot list asset source");
                Vec::new()
            }
        }
    }

    fn copy_group(&self, source: &Path, group: &AssetGroup, public_dir: &Path) -> AssetResult<usize> {
        let from = source.join(group.as_str());
        let to = public_dir.join(group.as_str());

        let files = self.fs.list_files(&from).map_err(|e| AssetError::Copy {
            from: from.clone(),
            to: to.clone(),
            source: e,
        })?;

        for relative in &files {
            let (file_from, file_to) = (from.join(relative), to.join(relative));
            self.fs
                .copy_file(&file_from, &file_to)
                .map_err(|e| AssetError::Copy {
                    from: file_from,
                    to: file_to,
                    source: e,
                })?;
        }

        Ok(files.len())
    }
}
