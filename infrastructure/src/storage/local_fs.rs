//! Local filesystem adapter

use casequery_application::ports::file_store::{FileStore, FileStoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileStore;

impl LocalFileStore {
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(operation: &'static str, path: &Path) -> Result<(), FileStoreError> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| FileStoreError::io(operation, parent, e))
            }
            _ => Ok(()),
        }
    }
}

fn map_io(operation: &'static str, path: &Path, e: std::io::Error) -> FileStoreError {
    if e.kind() == ErrorKind::NotFound {
        FileStoreError::NotFound(path.to_path_buf())
    } else {
        FileStoreError::io(operation, path, e)
    }
}

impl FileStore for LocalFileStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>, FileStoreError> {
        fs::read(path).map_err(|e| map_io("read", path, e))
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<(), FileStoreError> {
        Self::ensure_parent("write", path)?;
        fs::write(path, text).map_err(|e| map_io("write", path, e))
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<(), FileStoreError> {
        Self::ensure_parent("move", to)?;
        if fs::rename(from, to).is_ok() {
            return Ok(());
        }
        // Cross-device moves fall back to copy + remove
        fs::copy(from, to).map_err(|e| map_io("move", from, e))?;
        fs::remove_file(from).map_err(|e| map_io("move", from, e))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FileStoreError> {
        Self::ensure_parent("copy", to)?;
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io("copy", from, e))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FileStoreError> {
        fs::create_dir_all(path).map_err(|e| map_io("create", path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), FileStoreError> {
        fs::remove_dir_all(path).map_err(|e| map_io("remove", path, e))
    }

    fn list_subdirectories(&self, root: &Path) -> Result<Vec<PathBuf>, FileStoreError> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(root).map_err(|e| map_io("list", root, e))? {
            let entry = entry.map_err(|e| map_io("list", root, e))?;
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                dirs.push(entry.path());
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    fn walk_files(&self, dir: &Path) -> Result<Vec<PathBuf>, FileStoreError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| FileStoreError::io("walk", dir, e))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
