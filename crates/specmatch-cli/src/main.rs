//! specmatch CLI
//!
//! Flatten, compare and format JSON/YAML documents from the command line.
//!
//! Exit status: 0 on success (or equal), 1 when a comparison finds a
//! difference, 2 on any error.

use clap::{Parser, Subcommand, ValueEnum};
use specmatch_core::logging_facility::{init, Profile};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;
mod input;

use commands::Status;
use config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "specmatch")]
#[command(about = "Structural snapshots and selective equality for records", long_about = None)]
struct Cli {
    /// TOML file with extra scopes and order-insensitive list rules
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs to stderr (RUST_LOG overrides the level)
    #[arg(long, global = true, value_enum)]
    log: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the flattened snapshot of a document
    Flatten(commands::flatten::FlattenArgs),
    /// Compare two documents (or snapshots) over selected paths
    Compare(commands::compare::CompareArgs),
    /// Re-render a document as JSON
    Fmt(commands::fmt::FmtArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.log {
        Some(LogFormat::Human) => init(Profile::Development),
        Some(LogFormat::Json) => init(Profile::Production),
        None => {}
    }

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Flatten(args) => commands::flatten::execute(args, &config),
        Commands::Compare(args) => commands::compare::execute(args, &config),
        Commands::Fmt(args) => commands::fmt::execute(args),
    });

    match result {
        Ok(Status::Success) => ExitCode::SUCCESS,
        Ok(Status::Different) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
