//! scholarkg CLI - bibliographic knowledge-graph generator.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so `check --json` keeps stdout clean
    let default_filter = if cli.verbose { "scholarkg=debug" } else { "scholarkg=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Generate { run, report } => commands::generate::run(run, report, cli.verbose),

        Commands::Tbox { run } => commands::tbox::run(run, cli.verbose),

        Commands::Abox { run, report } => commands::abox::run(run, report, cli.verbose),

        Commands::Check { run, json } => commands::check::run(run, json, cli.verbose),
    };

    if let Err(e) = result {
        error!(error = %e, "run failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
