//! Unearth CLI - batch archive discovery and extraction with dual-engine
//! fallback.

mod cli;
mod commands;
mod error;
mod output;
mod progress;
mod prompt;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Extract(args) => {
            commands::extract::execute(args, &*formatter, cli.quiet, cli.json)
        }
        cli::Commands::Scan(args) => commands::scan::execute(args, &*formatter),
    }
}
