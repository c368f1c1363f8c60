//! Concurrency guard for the store file
//!
//! Readers share, writers are exclusive. Waiters are served in FIFO order
//! (tokio's `RwLock` is fair), so a stream of readers cannot starve an
//! append. Acquisition is not reentrant: a task holding either side must
//! not ask again.

use std::time::Instant;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::observability::Logger;

/// Mutual exclusion around one owned resource
#[derive(Debug)]
pub struct ConcurrencyGuard<T> {
    inner: RwLock<T>,
}

impl<T> ConcurrencyGuard<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(value),
        }
    }

    /// Shared access. Suspends while a writer holds or is queued ahead.
    pub async fn read(&self) -> RwLockReadGuard<'_, T> {
        if let Ok(guard) = self.inner.try_read() {
            return guard;
        }
        let started = Instant::now();
        let guard = self.inner.read().await;
        log_contention("shared", started);
        guard
    }

    /// Exclusive access. Released when the returned guard drops, on every
    /// exit path.
    pub async fn write(&self) -> RwLockWriteGuard<'_, T> {
        if let Ok(guard) = self.inner.try_write() {
            return guard;
        }
        let started = Instant::now();
        let guard = self.inner.write().await;
        log_contention("exclusive", started);
        guard
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

fn log_contention(mode: &str, started: Instant) {
    let waited = started.elapsed().as_millis().to_string();
    Logger::trace("STORE_GUARD_CONTENDED", &[("mode", mode), ("waited_ms", &waited)]);
}
