//! Deploy command.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use gangplank_nomad::NomadClient;
use gangplank_plugin::{NomadPlatform, Platform, Source};

use crate::manifest::Manifest;
use crate::report::TermReporter;

#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Logical application name; the job name is derived from it.
    #[arg(long)]
    app: String,

    /// Container image reference to deploy.
    #[arg(long)]
    image: String,

    /// Runtime environment for the application (repeatable).
    #[arg(long = "env", value_parser = super::parse_env_pair)]
    env: Vec<(String, String)>,

    /// Write the deployment record here for a later `gangplank release`.
    #[arg(long)]
    record: Option<PathBuf>,
}

pub async fn run(manifest_path: &Path, client: NomadClient, args: DeployArgs) -> Result<()> {
    let config = Manifest::load(manifest_path)?.deploy()?;
    let platform = NomadPlatform::new(config, client)?;

    let source = Source {
        app: args.app,
        image: args.image,
    };
    let runtime_env: BTreeMap<String, String> = args.env.into_iter().collect();
    let reporter = TermReporter;

    let deployment =
        super::cancellable(platform.deploy(&source, &runtime_env, &reporter)).await??;

    let record = serde_json::to_string_pretty(&deployment)?;
    if let Some(path) = &args.record {
        std::fs::write(path, &record)
            .with_context(|| format!("failed to write record: {}", path.display()))?;
    }
    println!("{record}");

    Ok(())
}
