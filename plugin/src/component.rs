//! Capability interfaces and the records that flow between them.
//!
//! The host runtime selects which capabilities a component offers by which
//! of these traits the configuration-holding type implements. Both traits
//! receive a [`StatusReporter`] collaborator; cancellation is the caller's
//! context (drop the future to abort).

use std::collections::BTreeMap;

use async_trait::async_trait;
use gangplank_id::DeploymentId;
use serde::{Deserialize, Serialize};

use crate::error::{DeployError, ReleaseError};
use crate::status::StatusReporter;

/// The logical application being operated on: its name and the container
/// image reference produced by the build/registry stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub app: String,
    pub image: String,
}

/// Output of a deploy: the fresh deployment identity and the derived job
/// name. Immutable once produced; consumed as input to release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: DeploymentId,
    pub name: String,
}

/// Output of a release: identity and name copied from the deployment, plus
/// the public URL the job is now attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: DeploymentId,
    pub name: String,
    pub url: String,
}

impl Release {
    /// The public URL of the released application.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Deploy capability: place an application onto the cluster scheduler.
#[async_trait]
pub trait Platform {
    /// Deploy `source` with the caller's runtime environment layered into
    /// the application environment.
    async fn deploy(
        &self,
        source: &Source,
        runtime_env: &BTreeMap<String, String>,
        status: &dyn StatusReporter,
    ) -> Result<Deployment, DeployError>;
}

/// Release capability: attach an already-deployed job to a public domain.
#[async_trait]
pub trait ReleaseManager {
    async fn release(
        &self,
        target: &Deployment,
        status: &dyn StatusReporter,
    ) -> Result<Release, ReleaseError>;
}
