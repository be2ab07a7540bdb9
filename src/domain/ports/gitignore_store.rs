//! GitignoreStore port - serialized access to the public `.gitignore`

use std::path::Path;

use crate::domain::entities::GitignoreLines;
use crate::error::AssetResult;

/// When an update writes the file back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteBack {
    /// Write even when the lines are unchanged
    Always,
    /// Write only when the edit changed the lines
    IfChanged,
}

/// Read-modify-write access to a `.gitignore` file.
///
/// `update` holds exclusive access for the whole cycle, so edits from
/// concurrent runs against the same public directory never interleave.
pub trait GitignoreStore {
    fn exists(&self, path: &Path) -> bool;

    /// Read the current lines without locking for write
    fn load(&self, path: &Path) -> AssetResult<GitignoreLines>;

    /// Apply `edit` to the current lines, creating the file if missing
    fn update<T>(
        &self,
        path: &Path,
        write_back: WriteBack,
        edit: impl FnOnce(&mut GitignoreLines) -> T,
    ) -> AssetResult<T>;
}

impl<S: GitignoreStore> GitignoreStore for &S {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn load(&self, path: &Path) -> AssetResult<GitignoreLines> {
        (**self).load(path)
    }

    fn update<T>(
        &self,
        path: &Path,
        write_back: WriteBack,
        edit: impl FnOnce(&mut GitignoreLines) -> T,
    ) -> AssetResult<T> {
        (**self).update(path, write_back, edit)
    }
}
