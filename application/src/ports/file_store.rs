//! File store port
//!
//! The processors never touch `std::fs` directly; every filesystem effect
//! goes through this port so the all-or-nothing group logic can be tested
//! against an in-memory store.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filesystem failures (read, write, move, copy, mkdir, delete)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileStoreError {
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to {operation} {}: {message}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        message: String,
    },
}

impl FileStoreError {
    pub fn io(operation: &'static str, path: &Path, error: impl std::fmt::Display) -> Self {
        FileStoreError::Io {
            operation,
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}

/// Filesystem operations used by the document and folder processors
pub trait FileStore: Send + Sync {
    fn read(&self, path: &Path) -> Result<Vec<u8>, FileStoreError>;

    /// Write text, creating parent directories as needed
    fn write_text(&self, path: &Path, text: &str) -> Result<(), FileStoreError>;

    /// Move a file, creating the destination's parent directories
    fn move_file(&self, from: &Path, to: &Path) -> Result<(), FileStoreError>;

    /// Copy a file, creating the destination's parent directories
    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FileStoreError>;

    fn create_dir_all(&self, path: &Path) -> Result<(), FileStoreError>;

    fn remove_dir_all(&self, path: &Path) -> Result<(), FileStoreError>;

    /// Immediate subdirectories, sorted by name
    fn list_subdirectories(&self, root: &Path) -> Result<Vec<PathBuf>, FileStoreError>;

    /// All files below `dir`, recursively, in directory-walk order
    fn walk_files(&self, dir: &Path) -> Result<Vec<PathBuf>, FileStoreError>;

    fn is_dir(&self, path: &Path) -> bool;
}
