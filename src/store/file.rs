//! The single store file, owned by the concurrency guard

use std::path::{Path, PathBuf};

use super::backend::TextFileBackend;
use super::errors::StoreResult;
use super::lock::{FileLock, LockMode};

/// Backend plus the path of the one JSON array file it manages.
///
/// Only reachable through [`super::ConcurrencyGuard`]; writes take
/// `&mut self` so they require the exclusive side of the guard.
#[derive(Debug)]
pub struct StoreFile<B> {
    backend: B,
    path: PathBuf,
}

impl<B: TextFileBackend> StoreFile<B> {
    pub fn new(backend: B, path: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// OS-level lock shared with every other handle on this path
    pub async fn lock(&self, mode: LockMode) -> StoreResult<FileLock> {
        FileLock::acquire_async(&self.path, mode).await
    }

    pub async fn exists(&self) -> StoreResult<bool> {
        self.backend.exists(&self.path).await
    }

    pub async fn read_text(&self) -> StoreResult<String> {
        self.backend.read_to_string(&self.path).await
    }

    /// Full-file replace
    pub async fn write_text(&mut self, contents: &str) -> StoreResult<()> {
        self.backend.write(&self.path, contents).await
    }
}
