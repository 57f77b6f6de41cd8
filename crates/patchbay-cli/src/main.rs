//! Patchbay CLI - Command-line interface for the A/V wiring editor.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "patchbay")]
#[command(author, version, about = "Patchbay A/V Wiring Diagram CLI", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this directory for settings and the recent list
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List equipment templates in the catalog
    Catalog(commands::catalog::CatalogArgs),

    /// Check whether two signal types can be wired together
    Compat(commands::compat::CompatArgs),

    /// Load a diagram, repairing it, and report what changed
    Check(commands::check::CheckArgs),

    /// Show the nodes, ports and cables of a diagram
    Info(commands::info::InfoArgs),

    /// Apply editing operations to a diagram
    Edit(commands::edit::EditArgs),

    /// List or export the bundled example diagrams
    Examples(commands::examples::ExamplesArgs),

    /// List recently used diagrams
    Recent,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = commands::common::Context::load(cli.config_dir)?;

    match cli.command {
        Commands::Catalog(args) => commands::catalog::run(&ctx, args),
        Commands::Compat(args) => commands::compat::run(args),
        Commands::Check(args) => commands::check::run(&ctx, args),
        Commands::Info(args) => commands::info::run(&ctx, args),
        Commands::Edit(args) => commands::edit::run(&ctx, args),
        Commands::Examples(args) => commands::examples::run(args),
        Commands::Recent => commands::recent::run(&ctx),
    }
}
