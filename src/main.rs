//! Waypost - inspect and resolve route manifests.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use waypost::cli::{self, Cli, Commands};
use waypost::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let routes = cli::common::load_routes(&cli.config, cli.overlay().session.as_deref())?;

    match &cli.command {
        Commands::List { json, .. } => cli::list::run_list(&routes, *json),
        Commands::Resolve {
            locations, json, ..
        } => cli::resolve::run_resolve(&routes, locations, *json),
        Commands::Check { .. } => cli::check::run_check(&routes),
    }
}
