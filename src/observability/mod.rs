//! Observability for the user store
//!
//! - Structured JSON logging with a process-wide minimum severity
//! - Begin/complete scopes with elapsed time
//! - Per-store operation counters
//!
//! ```ignore
//! use userstore::observability::{Logger, ObservationScope};
//!
//! Logger::info("SERVER_STARTED", &[("addr", "localhost:3000")]);
//!
//! let scope = ObservationScope::with_fields("STORE_APPEND", &[("id", &id)]);
//! scope.complete_with_fields(&[("path", "spliced")]);
//! ```

mod logger;
mod metrics;
mod scope;

pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, StoreMetrics};
pub use scope::ObservationScope;
