//! Orchestrator Use Case

use std::sync::Arc;

use tracing::{debug, error};

use crate::application::install::{InstallOptions, InstallUseCase};
use crate::application::uninstall::{UninstallOptions, UninstallUseCase};
use crate::domain::entities::Package;
use crate::domain::ports::{
    DiagnosticSink, FileSystem, GitignoreStore, InstallPathResolver, ModuleConfigSource,
};

use super::event::LifecycleEvent;
use super::options::OrchestratorOptions;
use super::outcome::{Action, ActionReport, Outcome};
use super::queue::TaskQueue;

/// Routes lifecycle events to the installer and uninstaller
pub struct Orchestrator<FS, GS, CS, R>
where
    FS: FileSystem,
    GS: GitignoreStore,
    CS: ModuleConfigSource,
    R: InstallPathResolver,
{
    installer: InstallUseCase<FS, GS, CS>,
    uninstaller: UninstallUseCase<FS, GS, CS>,
    resolver: R,
    options: OrchestratorOptions,
    deferred: TaskQueue<Package>,
}

impl<FS, GS, CS, R> Orchestrator<FS, GS, CS, R>
where
    FS: FileSystem + Clone,
    GS: GitignoreStore + Clone,
    CS: ModuleConfigSource + Clone,
    R: InstallPathResolver,
{
    pub fn new(
        fs: FS,
        gitignore: GS,
        configs: CS,
        resolver: R,
        diagnostics: Arc<dyn DiagnosticSink>,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            installer: InstallUseCase::new(
                fs.clone(),
                gitignore.clone(),
                configs.clone(),
                diagnostics.clone(),
            ),
            uninstaller: UninstallUseCase::new(fs, gitignore, configs, diagnostics),
            resolver,
            options,
            deferred: TaskQueue::new(),
        }
    }

    /// Installs waiting for `Commit`
    pub fn pending(&self) -> usize {
        self.deferred.len()
    }

    /// Handle one event and return the outcomes of the actions it ran
    pub fn handle(&mut self, event: LifecycleEvent) -> Vec<Outcome> {
        match event {
            LifecycleEvent::Install { package } => self.install(package).into_iter().collect(),
            LifecycleEvent::Update { from, to } => self.update(from, to),
            LifecycleEvent::Uninstall { package } => vec![self.uninstall(package)],
            LifecycleEvent::Commit => self.flush(),
        }
    }

    /// Install now, or queue it in deferred mode
    pub fn install(&mut self, package: Package) -> Option<Outcome> {
        if self.options.defer_installs {
            debug!(package = %package.name, "install deferred until commit");
            self.deferred.push(package);
            return None;
        }
        Some(self.run_install(package))
    }

    /// Uninstalls always run immediately
    pub fn uninstall(&mut self, package: Package) -> Outcome {
        let result = self.resolver.install_path(&package).and_then(|path| {
            self.uninstaller
                .execute(
                    &package,
                    &path,
                    &UninstallOptions::new(&self.options.public_dir),
                )
                .map(ActionReport::Uninstall)
        });
        log_failure(&package, Action::Uninstall, &result);

        Outcome {
            package,
            action: Action::Uninstall,
            result,
        }
    }

    /// Remove the old version's assets, then install the new version's
    pub fn update(&mut self, from: Package, to: Package) -> Vec<Outcome> {
        let mut outcomes = vec![self.uninstall(from)];
        outcomes.extend(self.install(to));
        outcomes
    }

    /// Run every deferred install in the order it was queued
    pub fn flush(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::with_capacity(self.deferred.len());
        while let Some(package) = self.deferred.pop() {
            outcomes.push(self.run_install(package));
        }
        outcomes
    }

    fn run_install(&self, package: Package) -> Outcome {
        let result = self.resolver.install_path(&package).and_then(|path| {
            self.installer
                .execute(
                    &package,
                    &path,
                    &InstallOptions::new(&self.options.public_dir),
                )
                .map(ActionReport::Install)
        });
        log_failure(&package, Action::Install, &result);

        Outcome {
            package,
            action: Action::Install,
            result,
        }
    }
}

fn log_failure(package: &Package, action: Action, result: &crate::error::AssetResult<ActionReport>) {
    if let Err(e) = result {
        error!(package = %package.name, %action, error = %e, "asset action failed");
    }
}
