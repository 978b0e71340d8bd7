//! Manifest parsing.
//!
//! The manifest is a TOML file with a `[deploy]` table and, for releases, a
//! `[release]` table. The tables map straight onto the engine's
//! configuration structs.

use std::path::Path;

use anyhow::{Context, Result};
use gangplank_plugin::{DeployConfig, ReleaseConfig};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub deploy: Option<DeployConfig>,
    pub release: Option<ReleaseConfig>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("invalid manifest TOML: {}", path.display()))
    }

    pub fn deploy(self) -> Result<DeployConfig> {
        self.deploy
            .context("manifest has no [deploy] table")
    }

    pub fn release(self) -> Result<ReleaseConfig> {
        self.release
            .context("manifest has no [release] table")
    }
}
