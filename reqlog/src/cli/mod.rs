//! CLI module for reqlog
//!
//! Provides the command-line interface for the server and the table lifecycle.

pub mod export;
pub mod lifecycle;
pub mod serve;

use clap::{Parser, Subcommand};

/// API request logger - records outgoing HTTP calls and serves them back
#[derive(Parser, Debug)]
#[command(name = "reqlog")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    REQLOG_HOST                   Bind address (default: 0.0.0.0)
    REQLOG_PORT                   Listen port (default: 8080)
    REQLOG_LOG_LEVEL              Log level (default: info)
    REQLOG_DATA_DIR               Data directory (default: ~/.reqlog)
    REQLOG_DATABASE_URL           Database URL (default: sqlite:{data_dir}/reqlog.db)
    REQLOG_ADMIN_TOKEN            Bearer token required by the admin API
    REQLOG_TEST_REQUEST_BASE_URL  Base URL for the admin test request
    REQLOG_HTTP_TIMEOUT_SECS      Outgoing request timeout (default: 30)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server
    Serve(serve::ServeArgs),
    /// Create the log table if it does not exist
    Install,
    /// Drop the log table and all recorded entries
    Uninstall,
    /// Write all log entries as CSV
    Export(export::ExportArgs),
}
