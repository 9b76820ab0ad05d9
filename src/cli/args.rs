//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and resolve route manifests
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// Route manifest path (default: routes.toml)
    #[arg(short = 'C', long, default_value = "routes.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List every registered route
    #[command(visible_alias = "l")]
    List {
        #[command(flatten)]
        overlay: OverlayArgs,

        /// Output JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },

    /// Resolve browser locations to navigation targets
    #[command(visible_alias = "r")]
    Resolve {
        /// Locations to resolve (e.g. `/greet/bob?x=1`)
        #[arg(value_name = "LOCATION", required = true)]
        locations: Vec<String>,

        #[command(flatten)]
        overlay: OverlayArgs,

        /// Output JSON instead of text
        #[arg(short, long)]
        json: bool,
    },

    /// Validate the manifest without serving anything
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        overlay: OverlayArgs,
    },
}

/// Session overlay arguments shared by every command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OverlayArgs {
    /// Session manifest layered over the application routes
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub session: Option<PathBuf>,
}

impl Cli {
    /// Session overlay of the selected command.
    pub fn overlay(&self) -> &OverlayArgs {
        match &self.command {
            Commands::List { overlay, .. }
            | Commands::Resolve { overlay, .. }
            | Commands::Check { overlay } => overlay,
        }
    }
}
