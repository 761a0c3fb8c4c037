//! typebridge CLI
//!
//! Runs the analysis and naming pipeline over a serialized symbol graph

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "CLI tool needs to print to stdout/stderr"
)]

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod check;
mod logging;
mod report;
mod run;

#[derive(Parser)]
#[command(name = "typebridge")]
#[command(about = "Analyze and name a symbol graph for a structurally typed target", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Full pipeline output as JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every pass over a graph
    Run {
        /// Graph JSON produced by the loader
        graph: PathBuf,

        /// Pipeline configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate a configuration file and print it with defaults filled in
    CheckConfig {
        /// Pipeline configuration (TOML)
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match cli.command {
        Commands::Run { graph, config, format } => {
            run::run(&graph, config.as_deref(), format)?;
        }
        Commands::CheckConfig { config } => {
            check::check_config(&config)?;
        }
    }

    Ok(())
}
