//! Catalog rewriting
//!
//! Every mutation rebuilds the whole file from the current catalog with one
//! record replaced, appended or dropped. Untouched records are emitted row by
//! row exactly as they were read, with the catalog's own line ending.

use super::{parse_catalog, read_catalog, Catalog, CatalogError};
use crate::level::LevelRecord;
use crate::storage::LocalStorage;
use std::path::Path;

/// A single catalog mutation. Indices are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOp {
    /// Replace the record at `index`; index 0 means "not saved yet" and appends
    Overwrite(usize, LevelRecord),
    Append(LevelRecord),
    Delete(usize),
}

/// New file contents plus the index the edited level now lives at
///
/// For deletes the index is 1 if any record remains, otherwise 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub contents: String,
    pub index: usize,
}

/// Compute the file contents that result from applying `op` to `catalog`
pub fn apply(catalog: &Catalog, op: &CatalogOp) -> Result<Rewrite, CatalogError> {
    match op {
        CatalogOp::Overwrite(0, record) | CatalogOp::Append(record) => {
            let records = catalog.records().iter().chain(std::iter::once(record));
            Ok(Rewrite {
                contents: serialize(records, catalog.line_ending()),
                index: catalog.len() + 1,
            })
        }
        CatalogOp::Overwrite(index, record) => {
            catalog.check_index(*index)?;
            let records = catalog
                .records()
                .iter()
                .enumerate()
                .map(|(i, r)| if i + 1 == *index { record } else { r });
            Ok(Rewrite {
                contents: serialize(records, catalog.line_ending()),
                index: *index,
            })
        }
        CatalogOp::Delete(index) => {
            catalog.check_index(*index)?;
            let records = catalog
                .records()
                .iter()
                .enumerate()
                .filter(|(i, _)| i + 1 != *index)
                .map(|(_, r)| r);
            let remaining = catalog.len() - 1;
            Ok(Rewrite {
                contents: serialize(records, catalog.line_ending()),
                index: usize::from(remaining > 0),
            })
        }
    }
}

/// Apply `op` and write the result over the existing catalog file
///
/// The file must already exist. Callers re-read the catalog afterwards.
pub fn write_catalog(
    storage: &LocalStorage,
    path: impl AsRef<Path>,
    catalog: &Catalog,
    op: &CatalogOp,
) -> Result<Rewrite, CatalogError> {
    let path = path.as_ref();
    let rewrite = apply(catalog, op)?;
    storage.overwrite(path, rewrite.contents.as_bytes())?;
    log::debug!(
        "Wrote {} bytes to {} ({})",
        rewrite.contents.len(),
        path.display(),
        op_name(op)
    );
    Ok(rewrite)
}

/// Apply `op`, write it out and read the catalog back
///
/// Once the write has succeeded this only fails if `op` was invalid; a failed
/// re-read falls back to the contents just written.
pub fn write_and_reload(
    storage: &LocalStorage,
    path: impl AsRef<Path>,
    catalog: &Catalog,
    op: &CatalogOp,
) -> Result<(usize, Catalog), CatalogError> {
    let path = path.as_ref();
    let rewrite = write_catalog(storage, path, catalog, op)?;
    let fresh = reread_or_written(read_catalog(storage, path), &rewrite.contents);
    Ok((rewrite.index, fresh))
}

fn reread_or_written(reread: Result<Catalog, CatalogError>, written: &str) -> Catalog {
    match reread {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Catalog was written but could not be read back: {}", e);
            parse_catalog(written)
        }
    }
}

fn op_name(op: &CatalogOp) -> &'static str {
    match op {
        CatalogOp::Overwrite(0, _) | CatalogOp::Append(_) => "append",
        CatalogOp::Overwrite(..) => "overwrite",
        CatalogOp::Delete(_) => "delete",
    }
}

/// Rows end in `eol`; records are separated by one blank line
fn serialize<'a>(records: impl Iterator<Item = &'a LevelRecord>, eol: &str) -> String {
    let mut out = String::new();
    for (i, record) in records.enumerate() {
        if i > 0 {
            out.push_str(eol);
        }
        for row in record.rows() {
            out.push_str(row);
            out.push_str(eol);
        }
    }
    out
}
