//! Advisory OS lock on a sidecar `<store>.lock` file
//!
//! The concurrency guard only orders operations inside one `UserStore`.
//! Other handles on the same path, in this process or another (the CLI
//! next to a running server), are ordered by this lock. Readers take it
//! shared, mutations exclusive.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::errors::{StoreError, StoreResult};

/// Lock mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

impl LockMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockMode::Shared => "shared",
            LockMode::Exclusive => "exclusive",
        }
    }
}

/// Held OS lock. Released on drop.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    mode: LockMode,
}

impl FileLock {
    /// `usuarios.json` -> `usuarios.json.lock`
    pub fn sidecar_path(store_path: &Path) -> PathBuf {
        let mut name = store_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "store".into());
        name.push(".lock");
        store_path.with_file_name(name)
    }

    /// Block the calling thread until the lock is held.
    pub fn acquire(store_path: &Path, mode: LockMode) -> StoreResult<Self> {
        let lock_path = Self::sidecar_path(store_path);
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::io(format!("Failed to create {}", parent.display()), e))?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&lock_path)
            .map_err(|e| StoreError::io(format!("Failed to open {}", lock_path.display()), e))?;

        match mode {
            LockMode::Shared => file.lock_shared(),
            LockMode::Exclusive => file.lock_exclusive(),
        }
        .map_err(|e| StoreError::io(format!("Failed to lock {}", lock_path.display()), e))?;

        Ok(Self { file, mode })
    }

    /// Acquire on the blocking pool so waiting never stalls a runtime worker.
    pub async fn acquire_async(store_path: &Path, mode: LockMode) -> StoreResult<Self> {
        let store_path = store_path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::acquire(&store_path, mode))
            .await
            .map_err(|e| StoreError::Internal(format!("Lock task failed: {}", e)))?
    }

    pub fn mode(&self) -> LockMode {
        self.mode
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            FileLock::sidecar_path(Path::new("data/usuarios.json")),
            PathBuf::from("data/usuarios.json.lock")
        );
    }

    #[test]
    fn test_shared_locks_coexist() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("usuarios.json");

        let a = FileLock::acquire(&path, LockMode::Shared).unwrap();
        let b = FileLock::acquire(&path, LockMode::Shared).unwrap();
        assert_eq!(a.mode(), LockMode::Shared);
        assert_eq!(b.mode(), LockMode::Shared);
    }

    #[test]
    fn test_exclusive_waits_for_holder() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("usuarios.json");

        let held = FileLock::acquire(&path, LockMode::Exclusive).unwrap();
        let (tx, rx) = mpsc::channel();
        let waiter_path = path.clone();
        let waiter = thread::spawn(move || {
            let _lock = FileLock::acquire(&waiter_path, LockMode::Exclusive).unwrap();
            tx.send(()).unwrap();
        });

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        drop(held);
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
        waiter.join().unwrap();
    }
}
