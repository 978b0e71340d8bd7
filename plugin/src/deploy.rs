//! Deploy capability: job synthesis, identity stamping, registration, and
//! rollout monitoring.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use gangplank_id::DeploymentId;
use gangplank_nomad::{NomadClient, NomadError};
use validator::Validate;

use crate::component::{Deployment, Platform, Source};
use crate::config::DeployConfig;
use crate::env;
use crate::error::DeployError;
use crate::monitor::EvalMonitor;
use crate::status::StatusReporter;
use crate::template;

/// Job metadata key carrying the deployment identity.
pub const META_ID: &str = "waypoint.hashicorp.com/id";

/// Job metadata key carrying the registration nonce (UTC RFC3339). Sortable,
/// so successive registrations of logically-related jobs can be ordered by
/// external auditing.
pub const META_NONCE: &str = "waypoint.hashicorp.com/nonce";

/// The deploy capability for a Nomad cluster.
#[derive(Debug)]
pub struct NomadPlatform {
    config: DeployConfig,
    client: NomadClient,
}

impl NomadPlatform {
    /// Validate the configuration and bind it to a scheduler client.
    ///
    /// Configuration errors surface here, before any network call.
    pub fn new(config: DeployConfig, client: NomadClient) -> Result<Self, DeployError> {
        config
            .validate()
            .map_err(|e| DeployError::Config(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Access the scheduler client, e.g. to share it with a releaser.
    pub fn client(&self) -> &NomadClient {
        &self.client
    }
}

#[async_trait]
impl Platform for NomadPlatform {
    async fn deploy(
        &self,
        source: &Source,
        runtime_env: &BTreeMap<String, String>,
        status: &dyn StatusReporter,
    ) -> Result<Deployment, DeployError> {
        // Fresh identity per attempt; the job name is a pure function of
        // application name and identity.
        let id = DeploymentId::new();
        let name = format!("{}-{}", source.app, id).to_lowercase();
        tracing::debug!(deployment = %id, job = %name, image = %source.image, "starting deploy");

        let service_port = self.config.service_port.unwrap_or(env::DEFAULT_SERVICE_PORT);
        let app_env = env::app_env(service_port, &self.config.static_environment, runtime_env);
        let vars = env::template_vars(&self.config, &source.image, &name, &app_env)?;
        tracing::debug!(vars = ?env::to_env_strings(&vars), "computed template variables");

        // Reconcile against partial cluster state: adopt a job we already
        // manage under this name, otherwise synthesize one from the template.
        let mut job = match self.client.job(&name).await {
            Ok(existing) => {
                status.update(&format!("Reusing existing job definition for {name}"));
                existing
            }
            Err(NomadError::JobNotFound) => {
                status.update("Rendering jobspec template");
                let mut job = template::synthesize(&self.config.jobspec, &vars, self.config.allow_fs)?;
                job.id = Some(name.clone());
                job.name = Some(name.clone());
                job
            }
            Err(e) => return Err(e.into()),
        };

        if job.region.is_none() {
            job.region = Some(self.config.region.clone());
        }
        if job.namespace.is_none() {
            job.namespace = self.config.namespace.clone();
        }

        // Stamped exactly once per registration, after synthesis, before
        // submission. Additive: pre-existing metadata keys are kept.
        job.set_meta(META_ID, id.to_string());
        job.set_meta(
            META_NONCE,
            Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
        );

        status.update("Registering job...");
        let eval_id = self.client.register(&job).await?;
        status.ok("Job registration successful");

        status.update(&format!("Monitoring evaluation \"{eval_id}\""));
        EvalMonitor::new(&self.client).monitor(&eval_id, status).await?;
        status.ok("Deployment successfully rolled out");

        Ok(Deployment { id, name })
    }
}
