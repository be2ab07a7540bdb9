//! Lifecycle events

use serde::{Deserialize, Serialize};

use crate::domain::entities::Package;

/// Package operation reported by the host package manager.
///
/// Serialized as JSON tagged by `event`, e.g.
/// `{"event": "install", "package": {"name": "org/pkg"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// A package was installed
    Install { package: Package },
    /// A package moved from one version to another
    Update { from: Package, to: Package },
    /// A package is about to be removed
    Uninstall { package: Package },
    /// The host finished its batch; run deferred work
    Commit,
}
