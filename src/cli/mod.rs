//! CLI module
//!
//! - serve: run the HTTP API
//! - list / append / update / delete: one store operation, JSON envelope out

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, DEFAULT_CONFIG_PATH};
pub use commands::{append, delete, list, run, run_command, serve, update};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
