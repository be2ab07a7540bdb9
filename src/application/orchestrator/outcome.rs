//! Per-package outcomes

use serde::Serialize;

use crate::application::install::InstallReport;
use crate::application::uninstall::UninstallReport;
use crate::domain::entities::Package;
use crate::error::AssetResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Install,
    Uninstall,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Install => write!(f, "install"),
            Action::Uninstall => write!(f, "uninstall"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionReport {
    Install(InstallReport),
    Uninstall(UninstallReport),
}

/// Result of one action on one package
#[derive(Debug)]
pub struct Outcome {
    pub package: Package,
    pub action: Action,
    pub result: AssetResult<ActionReport>,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }

    pub fn install_report(&self) -> Option<&InstallReport> {
        match &self.result {
            Ok(ActionReport::Install(report)) => Some(report),
            _ => None,
        }
    }
}
