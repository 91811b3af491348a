//! geocatalog CLI - Command-line interface
//!
//! Batch index maintenance and combined search over a catalog snapshot.

mod commands;
mod error;

use clap::{Parser, Subcommand};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "geocatalog")]
#[command(version = geocatalog::VERSION)]
#[command(about = "Spatio-temporal index and combined search for a geographic catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory for log files
    #[arg(long, default_value = "logs", global = true)]
    log_dir: String,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild spatio-temporal index records for every map and layer
    Reindex(commands::reindex::ReindexArgs),
    /// Run a combined map and layer search
    Search(commands::search::SearchArgs),
}

fn main() {
    let cli = Cli::parse();

    let _logging = match geocatalog::logging::init_logging(&cli.log_dir, "geocatalog.log") {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    let result = match cli.command {
        Command::Reindex(args) => commands::reindex::run(args),
        Command::Search(args) => commands::search::run(args),
    };

    if let Err(e) = result {
        e.exit();
    }
}
