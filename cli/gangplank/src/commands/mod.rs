//! Command definitions and dispatch.

use std::future::Future;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gangplank_nomad::{NomadClient, NomadConfig};

mod deploy;
mod release;

/// Deploy to Nomad and release through Traefik.
#[derive(Debug, Parser)]
#[command(name = "gangplank", version, about)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to the manifest file.
    #[arg(short = 'f', long, global = true, default_value = "gangplank.toml")]
    pub manifest: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Deploy an application image as a Nomad job.
    Deploy(deploy::DeployArgs),

    /// Attach a deployed job to a public domain.
    Release(release::ReleaseArgs),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let client = client_from_env()?;
        match self.command {
            Command::Deploy(args) => deploy::run(&self.manifest, client, args).await,
            Command::Release(args) => release::run(&self.manifest, client, args).await,
        }
    }
}

/// Build the scheduler client from the ambient Nomad environment
/// (`NOMAD_ADDR`, `NOMAD_TOKEN`, ...).
fn client_from_env() -> Result<NomadClient> {
    Ok(NomadClient::new(NomadConfig::from_env())?)
}

/// Run an operation, cancelling it (by drop) on ctrl-c.
pub(crate) async fn cancellable<T>(operation: impl Future<Output = T>) -> Result<T> {
    tokio::select! {
        result = operation => Ok(result),
        _ = tokio::signal::ctrl_c() => {
            anyhow::bail!("canceled");
        }
    }
}

/// Parse repeated `KEY=VALUE` arguments.
pub(crate) fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}
