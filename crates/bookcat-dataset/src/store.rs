//! JSON persistence for a record batch.
//!
//! The batch is written as one pretty-printed JSON array, in crawl order, so
//! that re-running a crawl over an unchanged catalog produces a byte-identical
//! file.

use std::path::Path;

use bookcat_core::ItemRecord;

use crate::error::DatasetError;

/// Writes `records` to `path`, creating parent directories as needed.
///
/// The file is written to a sibling temp path and renamed into place, so a
/// reader never observes a half-written batch.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] on filesystem failures and
/// [`DatasetError::Json`] if serialization fails.
pub fn write_records(path: &Path, records: &[ItemRecord]) -> Result<(), DatasetError> {
    let io_err = |source: std::io::Error| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut body = serde_json::to_vec_pretty(records).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    body.push(b'\n');

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, body).map_err(io_err)?;
    std::fs::rename(&tmp_path, path).map_err(io_err)?;

    tracing::info!(path = %path.display(), records = records.len(), "record batch written");
    Ok(())
}

/// Reads a batch previously written by [`write_records`].
///
/// # Errors
///
/// Returns [`DatasetError::Io`] if the file cannot be read and
/// [`DatasetError::Json`] if it is not a JSON array of records.
pub fn read_records(path: &Path) -> Result<Vec<ItemRecord>, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })
}
