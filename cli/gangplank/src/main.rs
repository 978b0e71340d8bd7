//! gangplank - deploy to Nomad, release through Traefik.
//!
//! A thin host around the deploy/release capabilities: loads the manifest,
//! builds the scheduler client from the ambient Nomad environment, and
//! renders progress to the terminal.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod manifest;
mod report;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GANGPLANK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.run().await {
        report::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
