//! Error types for asset-manager
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for asset-manager operations
pub type AssetResult<T> = Result<T, AssetError>;

/// Main error type for asset operations
#[derive(Error, Debug)]
pub enum AssetError {
    /// I/O failure on a specific path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying a single asset file failed
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: FsError,
    },

    /// Removing an installed asset tree failed
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// The public `.gitignore` could not be read, locked or written
    #[error("cannot update {path}: {message}")]
    Gitignore { path: PathBuf, message: String },

    /// `vendor/composer/installed.json` is unreadable
    #[error("invalid installed package manifest {path}: {message}")]
    InstalledManifest { path: PathBuf, message: String },

    /// Settings file is invalid
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Name cannot be used as an asset group
    #[error("'{name}' is not a valid asset group name")]
    InvalidGroupName { name: String },

    /// PHP source could not be tokenized
    #[error("cannot tokenize {file}:{line}: {message}")]
    Lex {
        file: PathBuf,
        line: usize,
        message: String,
    },
}

impl AssetError {
    /// Wrap an `io::Error` with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssetError::Io {
            path: path.into(),
            source,
        }
    }
}
