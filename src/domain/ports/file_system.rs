//! FileSystem port - abstraction over the file operations asset publishing needs
//!
//! Use cases copy and remove whole asset trees through this trait, so tests can
//! swap in a failing implementation.

use std::path::{Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io(std::io::Error),
    /// Other error
    Other(String),
}

impl FsError {
    /// Classify an `io::Error` raised while operating on `path`
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        FsError::at(Path::new(""), err)
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io(err) => write!(f, "I/O error: {}", err),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - test doubles that fail on demand
pub trait FileSystem {
    /// Check if path is a directory (following symlinks)
    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the immediate subdirectories of `path`, sorted
    fn list_dirs(&self, path: &Path) -> FsResult<Vec<String>>;

    /// Every file beneath `root`, as paths relative to `root`, sorted.
    ///
    /// Hidden files are included; ignore files are not honoured.
    fn list_files(&self, root: &Path) -> FsResult<Vec<PathBuf>>;

    /// Copy one file, creating parent directories and overwriting `to`
    fn copy_file(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Remove a directory and everything beneath it
    fn remove_tree(&self, path: &Path) -> FsResult<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn list_dirs(&self, path: &Path) -> FsResult<Vec<String>> {
        (**self).list_dirs(path)
    }

    fn list_files(&self, root: &Path) -> FsResult<Vec<PathBuf>> {
        (**self).list_files(root)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> FsResult<()> {
        (**self).copy_file(from, to)
    }

    fn remove_tree(&self, path: &Path) -> FsResult<()> {
        (**self).remove_tree(path)
    }
}
