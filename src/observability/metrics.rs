//! Store metrics
//!
//! - Counters only, monotonic, reset on process start
//! - Thread-safe via relaxed atomics

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::store::AppendPath;

/// Operation counters for one store
#[derive(Debug, Default)]
pub struct StoreMetrics {
    appends_new_array: AtomicU64,
    appends_spliced: AtomicU64,
    appends_reparsed: AtomicU64,
    lists: AtomicU64,
    updates: AtomicU64,
    deletes: AtomicU64,
    overwrites: AtomicU64,
    not_found: AtomicU64,
    failures: AtomicU64,
}

impl StoreMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_append(&self, path: AppendPath) {
        let counter = match path {
            AppendPath::NewArray => &self.appends_new_array,
            AppendPath::Spliced => &self.appends_spliced,
            AppendPath::Reparsed => &self.appends_reparsed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lists(&self) {
        self.lists.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updates(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deletes(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_overwrites(&self) {
        self.overwrites.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failures(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let appends_new_array = self.appends_new_array.load(Ordering::Relaxed);
        let appends_spliced = self.appends_spliced.load(Ordering::Relaxed);
        let appends_reparsed = self.appends_reparsed.load(Ordering::Relaxed);

        MetricsSnapshot {
            appends: appends_new_array + appends_spliced + appends_reparsed,
            appends_new_array,
            appends_spliced,
            appends_reparsed,
            lists: self.lists.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            overwrites: self.overwrites.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub appends: u64,
    pub appends_new_array: u64,
    pub appends_spliced: u64,
    pub appends_reparsed: u64,
    pub lists: u64,
    pub updates: u64,
    pub deletes: u64,
    pub overwrites: u64,
    pub not_found: u64,
    pub failures: u64,
}
