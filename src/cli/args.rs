//! CLI argument definitions using clap
//!
//! Commands:
//! - userstore serve
//! - userstore list [--limit N]
//! - userstore append            (record JSON on stdin)
//! - userstore update --id ID    (patch JSON on stdin)
//! - userstore delete --id ID

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default config file, used only when present
pub const DEFAULT_CONFIG_PATH: &str = "./userstore.json";

/// userstore - user records in a single JSON file
#[derive(Parser, Debug)]
#[command(name = "userstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file. Missing default file means built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print stored records
    List {
        /// Maximum number of records; 0 prints all
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        limit: i64,
    },

    /// Validate a record read from stdin and append it
    Append,

    /// Apply a partial update read from stdin
    Update {
        /// Record id
        #[arg(long)]
        id: String,
    },

    /// Delete a record
    Delete {
        /// Record id
        #[arg(long)]
        id: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
