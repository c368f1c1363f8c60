//! `UserStore`: the handle the HTTP layer and CLI call into.

use std::path::{Path, PathBuf};

use crate::observability::{Logger, ObservationScope, StoreMetrics};
use crate::record::{NewRecord, Record, RecordPatch};

use super::append::{self, AppendPath};
use super::backend::TextFileBackend;
use super::errors::{StoreError, StoreResult};
use super::file::StoreFile;
use super::guard::ConcurrencyGuard;
use super::local::LocalBackend;
use super::lock::LockMode;
use super::whole_file;

/// One JSON array file of user records behind a concurrency guard.
///
/// Share it with `Arc`; every operation takes `&self`. Inside the handle
/// the guard orders operations; across handles and processes the
/// sidecar `<path>.lock` file does.
#[derive(Debug)]
pub struct UserStore<B = LocalBackend> {
    file: ConcurrencyGuard<StoreFile<B>>,
    path: PathBuf,
    metrics: StoreMetrics,
}

impl UserStore<LocalBackend> {
    /// Store on the local filesystem with atomic (temp + rename) writes
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_backend(LocalBackend::new(), path)
    }
}

impl<B: TextFileBackend> UserStore<B> {
    pub fn with_backend(backend: B, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            file: ConcurrencyGuard::new(StoreFile::new(backend, path.clone())),
            path,
            metrics: StoreMetrics::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metrics(&self) -> &StoreMetrics {
        &self.metrics
    }

    /// Create a record: assign id and `criadoEm`, append it, return it.
    pub async fn append(&self, input: NewRecord) -> StoreResult<Record> {
        let record = input.into_record();
        let scope = ObservationScope::with_fields("STORE_APPEND", &[("id", &record.id)]);

        let result = async {
            let mut file = self.file.write().await;
            let _lock = file.lock(LockMode::Exclusive).await?;
            append::append_record(&mut file, &record).await
        }
        .await;

        match result {
            Ok(path) => {
                self.metrics.record_append(path);
                if path == AppendPath::Reparsed {
                    Logger::warn(
                        "STORE_APPEND_REPARSED",
                        &[("path", &self.path.display().to_string())],
                    );
                }
                scope.complete_with_fields(&[("path", path.as_str())]);
                Ok(record)
            }
            Err(e) => Err(self.failed(scope, e)),
        }
    }

    /// First `limit` records in file order; `limit <= 0` returns all.
    pub async fn list_all(&self, limit: i64) -> StoreResult<Vec<Record>> {
        let scope = ObservationScope::new("STORE_LIST");

        let result = async {
            let file = self.file.read().await;
            let _lock = file.lock(LockMode::Shared).await?;
            whole_file::read_all(&file).await
        }
        .await;

        match result {
            Ok(records) => {
                self.metrics.increment_lists();
                let total = records.len().to_string();
                let records = whole_file::take_first(records, limit);
                scope.complete_with_fields(&[
                    ("returned", &records.len().to_string()),
                    ("total", &total),
                ]);
                Ok(records)
            }
            Err(e) => Err(self.failed(scope, e)),
        }
    }

    /// Merge `patch` over the record with `id`. `id` and `criadoEm` never change.
    pub async fn update_by_id(&self, id: &str, patch: RecordPatch) -> StoreResult<Record> {
        let scope = ObservationScope::with_fields("STORE_UPDATE", &[("id", id)]);

        let result = async {
            let mut file = self.file.write().await;
            let _lock = file.lock(LockMode::Exclusive).await?;
            whole_file::update_by_id(&mut file, id, patch).await
        }
        .await;

        match result {
            Ok(record) => {
                self.metrics.increment_updates();
                scope.complete();
                Ok(record)
            }
            Err(e) => Err(self.failed(scope, e)),
        }
    }

    /// Remove the record with `id` and return it.
    pub async fn delete_by_id(&self, id: &str) -> StoreResult<Record> {
        let scope = ObservationScope::with_fields("STORE_DELETE", &[("id", id)]);

        let result = async {
            let mut file = self.file.write().await;
            let _lock = file.lock(LockMode::Exclusive).await?;
            whole_file::delete_by_id(&mut file, id).await
        }
        .await;

        match result {
            Ok(record) => {
                self.metrics.increment_deletes();
                scope.complete();
                Ok(record)
            }
            Err(e) => Err(self.failed(scope, e)),
        }
    }

    /// Replace the whole file with `records`, verbatim.
    pub async fn overwrite_all(&self, records: &[Record]) -> StoreResult<()> {
        let scope = ObservationScope::new("STORE_OVERWRITE");

        let result = async {
            let mut file = self.file.write().await;
            let _lock = file.lock(LockMode::Exclusive).await?;
            whole_file::overwrite_all(&mut file, records).await
        }
        .await;

        match result {
            Ok(bytes) => {
                self.metrics.increment_overwrites();
                scope.complete_with_fields(&[
                    ("bytes", &bytes.to_string()),
                    ("records", &records.len().to_string()),
                ]);
                Ok(())
            }
            Err(e) => Err(self.failed(scope, e)),
        }
    }

    fn failed(&self, scope: ObservationScope<'_>, err: StoreError) -> StoreError {
        if matches!(err, StoreError::NotFound(_)) {
            self.metrics.increment_not_found();
        } else {
            self.metrics.increment_failures();
        }
        scope.fail(&err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = UserStore::open(temp.path().join("usuarios.json"));
        assert!(store.list_all(0).await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_metrics_track_operations() {
        let temp = TempDir::new().unwrap();
        let store = UserStore::open(temp.path().join("usuarios.json"));

        let ana = store.append(NewRecord::new("Ana", 30, "a@x.com")).await.unwrap();
        store.append(NewRecord::new("Bia", 25, "b@x.com")).await.unwrap();
        store.update_by_id(&ana.id, RecordPatch::new().age(31)).await.unwrap();
        let _ = store.delete_by_id("missing").await;

        let snapshot = store.metrics().snapshot();
        assert_eq!(snapshot.appends_new_array, 1);
        assert_eq!(snapshot.appends_spliced, 1);
        assert_eq!(snapshot.updates, 1);
        assert_eq!(snapshot.not_found, 1);
        assert_eq!(snapshot.failures, 0);
    }
}
