//! Release command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use gangplank_id::DeploymentId;
use gangplank_nomad::NomadClient;
use gangplank_plugin::{Deployment, ReleaseManager, TraefikReleaser};

use crate::manifest::Manifest;
use crate::report::TermReporter;

#[derive(Debug, Args)]
pub struct ReleaseArgs {
    /// Deployment record written by `gangplank deploy --record`.
    #[arg(long, conflicts_with_all = ["id", "name"])]
    record: Option<PathBuf>,

    /// Deployment identity, if no record file is used.
    #[arg(long, requires = "name")]
    id: Option<DeploymentId>,

    /// Job name, if no record file is used.
    #[arg(long, requires = "id")]
    name: Option<String>,
}

pub async fn run(manifest_path: &Path, client: NomadClient, args: ReleaseArgs) -> Result<()> {
    let config = Manifest::load(manifest_path)?.release()?;
    let releaser = TraefikReleaser::new(config, client)?;

    let target = load_target(&args)?;
    let reporter = TermReporter;

    let release = super::cancellable(releaser.release(&target, &reporter)).await??;

    println!("{}", serde_json::to_string_pretty(&release)?);
    Ok(())
}

fn load_target(args: &ReleaseArgs) -> Result<Deployment> {
    if let Some(path) = &args.record {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read record: {}", path.display()))?;
        return serde_json::from_str(&contents)
            .with_context(|| format!("invalid deployment record: {}", path.display()));
    }

    match (&args.id, &args.name) {
        (Some(id), Some(name)) => Ok(Deployment {
            id: *id,
            name: name.clone(),
        }),
        _ => anyhow::bail!("either --record or both --id and --name are required"),
    }
}
