//! # Store Backend Trait

use std::path::Path;

use async_trait::async_trait;

use super::errors::StoreResult;

/// Text-file primitive the store is built on
#[async_trait]
pub trait TextFileBackend: Send + Sync + std::fmt::Debug {
    /// Read the whole file as UTF-8 text
    async fn read_to_string(&self, path: &Path) -> StoreResult<String>;

    /// Replace the whole file content, creating it if missing
    async fn write(&self, path: &Path, contents: &str) -> StoreResult<()>;

    /// Check if the file exists
    async fn exists(&self, path: &Path) -> StoreResult<bool>;
}
