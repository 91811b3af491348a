//! CLI error handling with user-friendly messages.

use std::fmt;
use std::process;

use geocatalog::catalog::SnapshotError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Failed to load the catalog snapshot
    Snapshot(SnapshotError),
    /// Invalid exclusion pattern in configuration
    Config(String),
    /// Failed to serialize results for output
    Output(String),
}

impl CliError {
    /// Exit the process with an error message and a non-zero code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        if let CliError::Snapshot(_) = self {
            eprintln!();
            eprintln!("The catalog snapshot must be a JSON file with \"layers\" and \"maps\" arrays.");
        }
        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Snapshot(e) => write!(f, "Failed to load catalog snapshot: {}", e),
            CliError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}
