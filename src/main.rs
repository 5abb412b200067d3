//! Canonry - content discovery and URL canonicalization CLI.

use anyhow::Result;
use canonry::cli::{Cli, Commands, collect::run_collect, common::Workspace, routes::run_routes};
use canonry::logger;
use clap::{ColorChoice, Parser};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let ws = Workspace::open(&cli)?;

    match &cli.command {
        Commands::Collect { args } => run_collect(&ws, args),
        Commands::Routes { args } => run_routes(&ws, args),
    }
}
