//! User record store
//!
//! One JSON array file holds every record. Creates go through the append
//! engine, which splices the new record's text before the closing bracket;
//! list, update, delete and overwrite read the whole file, mutate in
//! memory and write the whole file back.
//!
//! # Invariants
//!
//! - After every operation the file parses as a JSON array
//! - Record ids are unique and never change
//! - At most one mutating operation touches the file at a time, across
//!   every handle and process sharing the path; reads
//!   never observe a half-written file
//! - A failed `Parse` or `NotFound` leaves the file byte-for-byte unchanged

mod append;
mod backend;
mod errors;
mod file;
mod guard;
mod local;
mod lock;
mod user_store;
mod whole_file;

pub use append::{single_element_array, splice_into_array, AppendPath, Splice};
pub use backend::TextFileBackend;
pub use errors::{StoreError, StoreResult};
pub use file::StoreFile;
pub use guard::ConcurrencyGuard;
pub use local::LocalBackend;
pub use lock::{FileLock, LockMode};
pub use user_store::UserStore;
