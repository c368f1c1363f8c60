//! userstore - user records kept in a single JSON array file
//!
//! Creates splice the new record into the file without re-encoding what
//! is already stored; list, update and delete rewrite the whole file. A
//! fair reader/writer guard serializes every mutation of the file.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod record;
pub mod store;
pub mod validation;
