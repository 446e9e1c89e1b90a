//! Storage layer for the level catalog
//!
//! All catalog I/O goes through [`LocalStorage`]. Operations are synchronous
//! and every file handle is closed before the call returns, on success and on
//! failure alike.

pub mod local;

pub use local::LocalStorage;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// File or directory not found
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Permission denied
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Any other I/O failure
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Classify an I/O error raised while touching `path`
    pub fn from_io(path: impl Into<PathBuf>, e: io::Error) -> Self {
        let path = path.into();
        match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(path),
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(path),
            _ => StorageError::Io { path, source: e },
        }
    }
}
