//! Locked `.gitignore` store
//!
//! Every read-modify-write cycle holds an exclusive advisory lock on the
//! `.gitignore` handle itself and rewrites the file through that handle.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use fs2::FileExt;

use crate::domain::entities::GitignoreLines;
use crate::domain::ports::{GitignoreStore, WriteBack};
use crate::error::{AssetError, AssetResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct LockedGitignoreStore;

impl LockedGitignoreStore {
    pub fn new() -> Self {
        Self
    }
}

fn gitignore_error(path: &Path, action: &str, err: std::io::Error) -> AssetError {
    AssetError::Gitignore {
        path: path.to_path_buf(),
        message: format!("{action}: {err}"),
    }
}

fn read_all(file: &mut File, path: &Path) -> AssetResult<Vec<u8>> {
    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|e| gitignore_error(path, "read failed", e))?;
    Ok(content)
}

/// Edit and write back through an already locked handle
fn rewrite<T>(
    file: &mut File,
    path: &Path,
    write_back: WriteBack,
    edit: impl FnOnce(&mut GitignoreLines) -> T,
) -> AssetResult<T> {
    let original = GitignoreLines::from_bytes(&read_all(file, path)?);
    let mut lines = original.clone();
    let value = edit(&mut lines);

    if write_back == WriteBack::Always || lines != original {
        file.seek(SeekFrom::Start(0))
            .and_then(|_| file.set_len(0))
            .and_then(|_| file.write_all(&lines.to_bytes()))
            .and_then(|_| file.flush())
            .map_err(|e| gitignore_error(path, "write failed", e))?;
    }
    Ok(value)
}

impl GitignoreStore for LockedGitignoreStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn load(&self, path: &Path) -> AssetResult<GitignoreLines> {
        let mut file = File::open(path).map_err(|e| AssetError::io(path, e))?;
        FileExt::lock_shared(&file)
            .map_err(|e| gitignore_error(path, "lock failed", e))?;
        let content = read_all(&mut file, path);
        let _ = FileExt::unlock(&file);
        Ok(GitignoreLines::from_bytes(&content?))
    }

    fn update<T>(
        &self,
        path: &Path,
        write_back: WriteBack,
        edit: impl FnOnce(&mut GitignoreLines) -> T,
    ) -> AssetResult<T> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| AssetError::io(path, e))?;
        FileExt::lock_exclusive(&file)
            .map_err(|e| gitignore_error(path, "lock failed", e))?;

        let result = rewrite(&mut file, path, write_back, edit);

        let _ = FileExt::unlock(&file);
        result
    }
}
