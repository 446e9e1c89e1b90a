//! Local filesystem storage backend
//!
//! Reads and rewrites whole files. Writing never creates a file: the catalog
//! must already exist, and [`LocalStorage::create_empty`] is the explicit way
//! for the surrounding tool to provide one.

use super::StorageError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Local filesystem storage backend
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Base directory for relative paths (usually current working directory)
    base_dir: PathBuf,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    /// Create a new local storage backend rooted at the current directory
    pub fn new() -> Self {
        Self::with_base_dir(".")
    }

    /// Create a local storage backend with a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a path relative to the base directory
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Read a whole file as UTF-8 text
    pub fn read_string(&self, path: impl AsRef<Path>) -> Result<String, StorageError> {
        let full_path = self.resolve(path);
        fs::read_to_string(&full_path).map_err(|e| StorageError::from_io(&full_path, e))
    }

    /// Replace the contents of an existing file with a single write
    ///
    /// Fails with [`StorageError::NotFound`] if the file does not exist.
    pub fn overwrite(&self, path: impl AsRef<Path>, data: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(path);
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&full_path)
            .map_err(|e| StorageError::from_io(&full_path, e))?;
        file.write_all(data)
            .and_then(|_| file.flush())
            .map_err(|e| StorageError::from_io(&full_path, e))
    }

    /// Create an empty file (and its parent directories) unless it already exists
    ///
    /// Returns true if a file was created.
    pub fn create_empty(&self, path: impl AsRef<Path>) -> Result<bool, StorageError> {
        let path = path.as_ref();
        if self.exists(path) {
            return Ok(false);
        }

        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::from_io(parent, e))?;
        }

        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .map_err(|e| StorageError::from_io(&full_path, e))?;
        Ok(true)
    }

    /// Check if a file exists
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.resolve(path).is_file()
    }
}
