//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod diagnostics;
pub mod file_system;
pub mod gitignore_store;
pub mod install_path;
pub mod module_config_source;

pub use diagnostics::{DiagnosticSink, NoopDiagnostics, RecordingDiagnostics};
pub use file_system::{FileSystem, FsError, FsResult};
pub use gitignore_store::{GitignoreStore, WriteBack};
pub use install_path::InstallPathResolver;
pub use module_config_source::{ConfigLookup, ModuleConfigSource};
