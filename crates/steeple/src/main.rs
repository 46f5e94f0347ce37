//! Steeple CLI
//!
//! Runs the license, update, and sermon operations a theme's admin screens
//! would trigger, against a local settings file.

mod cli;
mod commands;
mod output;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Must happen before any TLS operation
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let paths = commands::Paths {
        config: cli.config,
        settings: cli.settings,
    };

    match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::License(args) => commands::license::run(args, &paths).await,
        Commands::Update(args) => commands::update::run(args, &paths).await,
        Commands::Sermon(args) => commands::sermon::run(args),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
