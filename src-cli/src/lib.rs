//! Presskit command-line application.
//!
//! Thin layer over the library crates: argument parsing, logging setup,
//! configuration loading and the Ctrl-C race around a crawl.

#![warn(clippy::all)]

pub mod cli;
pub mod commands;

use cli::{Cli, Command};
use tracing::info;

/// Initialize tracing subscriber for logging.
///
/// Logs go to stderr so `list` and `config` output stays clean on stdout.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,presskit=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run the selected subcommand.
pub async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    info!("Starting Presskit v{}", env!("CARGO_PKG_VERSION"));

    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Run(args) => commands::run::execute(config_path, args).await,
        Command::List(args) => commands::list::execute(config_path, &args),
        Command::Config => commands::config::execute(config_path),
    }
}
