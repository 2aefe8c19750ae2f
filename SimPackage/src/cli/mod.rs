//! `SimPackage` CLI - Command-line interface for DBPF package tools

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "simpackage")]
#[command(version, about = "SimPackage: DBPF package index tools for The Sims 2, 3 and 4", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the `SimPackage` CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
