//! Level catalog - the shared text file holding every level
//!
//! The file is a sequence of row blocks separated by blank lines:
//!
//! ```text
//! #####
//! #. @#
//! #####
//!
//! ####
//! #@$.#
//! ####
//! ```
//!
//! A line counts as blank only when it is empty once the line ending is
//! removed. Lines made of spaces are level rows (an empty row inside a level
//! is written as `WIDTH` spaces).
//!
//! The line ending of the first line (`\r\n` or `\n`) is kept and used for
//! the whole file on rewrite. New files use `\n`.
//!
//! The file is the single source of truth: after every write the catalog is
//! read back from disk rather than patched in memory.

mod writer;

pub use writer::*;

use crate::level::LevelRecord;
use crate::storage::{LocalStorage, StorageError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by catalog reads and writes
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("nothing to save")]
    EmptyLevel,

    #[error("level {index} does not exist (catalog has {len} levels)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for CatalogError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(path) => CatalogError::FileNotFound(path),
            other => CatalogError::Storage(other),
        }
    }
}

/// Ordered list of level records, in file order
///
/// Positions are 1-based at the API surface to match the editor's level counter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    records: Vec<LevelRecord>,
    crlf: bool,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at 1-based `index`
    pub fn get(&self, index: usize) -> Option<&LevelRecord> {
        index.checked_sub(1).and_then(|i| self.records.get(i))
    }

    pub fn records(&self) -> &[LevelRecord] {
        &self.records
    }

    /// Line ending used when the catalog is written back
    pub fn line_ending(&self) -> &'static str {
        if self.crlf {
            "\r\n"
        } else {
            "\n"
        }
    }

    /// Validate a 1-based index against the current size
    pub fn check_index(&self, index: usize) -> Result<(), CatalogError> {
        if index == 0 || index > self.len() {
            return Err(CatalogError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }
}

/// Split file contents into level records
///
/// `\r\n` and `\n` endings are treated alike. Runs of blank lines collapse,
/// so empty records are never produced. Row lengths are not checked.
pub fn parse_catalog(contents: &str) -> Catalog {
    let mut records = Vec::new();
    let mut block: Vec<String> = Vec::new();

    // The trailing "" closes a final block that has no blank line after it
    for line in contents.lines().chain(std::iter::once("")) {
        if line.is_empty() {
            if !block.is_empty() {
                records.push(LevelRecord::from_rows(std::mem::take(&mut block)));
            }
        } else {
            block.push(line.to_string());
        }
    }

    let crlf = contents
        .find('\n')
        .is_some_and(|i| contents[..i].ends_with('\r'));
    Catalog { records, crlf }
}

/// Read and parse the catalog file at `path`
pub fn read_catalog(storage: &LocalStorage, path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let contents = storage.read_string(path)?;
    let catalog = parse_catalog(&contents);
    log::debug!("Read {} levels from {}", catalog.len(), path.display());
    Ok(catalog)
}
