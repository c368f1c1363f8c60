//! # Local Filesystem Backend

use std::path::Path;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::backend::TextFileBackend;
use super::errors::{StoreError, StoreResult};

/// Local filesystem backend
#[derive(Debug, Clone)]
pub struct LocalBackend {
    atomic_writes: bool,
}

impl LocalBackend {
    /// Create a backend that replaces files via temp file + rename
    pub fn new() -> Self {
        Self { atomic_writes: true }
    }

    /// Create a backend, choosing between temp-file replace and in-place writes
    pub fn with_atomic_writes(atomic_writes: bool) -> Self {
        Self { atomic_writes }
    }

    pub fn atomic_writes(&self) -> bool {
        self.atomic_writes
    }

    async fn replace_atomically(&self, path: &Path, contents: &str) -> StoreResult<()> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("store");
        let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        let result = async {
            let mut file = fs::File::create(&temp_path)
                .await
                .map_err(|e| StoreError::io(format!("Failed to create {}", temp_path.display()), e))?;
            file.write_all(contents.as_bytes())
                .await
                .map_err(|e| StoreError::io(format!("Failed to write {}", temp_path.display()), e))?;
            file.sync_all()
                .await
                .map_err(|e| StoreError::io(format!("fsync failed for {}", temp_path.display()), e))?;
            fs::rename(&temp_path, path)
                .await
                .map_err(|e| StoreError::io(format!("Failed to replace {}", path.display()), e))
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextFileBackend for LocalBackend {
    async fn read_to_string(&self, path: &Path) -> StoreResult<String> {
        fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::io(format!("Failed to read {}", path.display()), e))
    }

    async fn write(&self, path: &Path, contents: &str) -> StoreResult<()> {
        // Create parent directories
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(format!("Failed to create {}", parent.display()), e))?;
        }

        if self.atomic_writes {
            self.replace_atomically(path, contents).await
        } else {
            fs::write(path, contents)
                .await
                .map_err(|e| StoreError::io(format!("Failed to write {}", path.display()), e))
        }
    }

    async fn exists(&self, path: &Path) -> StoreResult<bool> {
        fs::try_exists(path)
            .await
            .map_err(|e| StoreError::io(format!("Failed to stat {}", path.display()), e))
    }
}
