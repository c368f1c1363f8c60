//! Whole-file operations: read-all, mutate in memory, write-all.
//!
//! Callers hold the guard; these functions never acquire it.

use crate::record::{decode_all, encode_all, Record, RecordPatch};

use super::backend::TextFileBackend;
use super::errors::{StoreError, StoreResult};
use super::file::StoreFile;

/// Parse every stored record. Missing or blank file reads as empty.
pub(crate) async fn read_all<B: TextFileBackend>(file: &StoreFile<B>) -> StoreResult<Vec<Record>> {
    if !file.exists().await? {
        return Ok(Vec::new());
    }
    let content = file.read_text().await?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    decode_all(&content)
}

/// Replace the file with `records`, pretty-printed. Returns bytes written.
pub(crate) async fn overwrite_all<B: TextFileBackend>(
    file: &mut StoreFile<B>,
    records: &[Record],
) -> StoreResult<usize> {
    let text = encode_all(records)?;
    file.write_text(&text).await?;
    Ok(text.len())
}

/// First `limit` records in file order; zero or negative means all.
pub(crate) fn take_first(mut records: Vec<Record>, limit: i64) -> Vec<Record> {
    if limit > 0 {
        records.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    records
}

pub(crate) async fn update_by_id<B: TextFileBackend>(
    file: &mut StoreFile<B>,
    id: &str,
    patch: RecordPatch,
) -> StoreResult<Record> {
    let mut records = read_all(file).await?;
    let record = records
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

    patch.apply_to(record);
    let updated = record.clone();

    overwrite_all(file, &records).await?;
    Ok(updated)
}

pub(crate) async fn delete_by_id<B: TextFileBackend>(
    file: &mut StoreFile<B>,
    id: &str,
) -> StoreResult<Record> {
    let mut records = read_all(file).await?;
    let index = records
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

    let removed = records.remove(index);
    overwrite_all(file, &records).await?;
    Ok(removed)
}
