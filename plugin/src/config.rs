//! Configuration surface for the deploy and release capabilities.
//!
//! Both structs deserialize from the host's configuration (the CLI feeds
//! them from a TOML manifest) and are validated before any network call.

use std::collections::BTreeMap;

use serde::Deserialize;
use validator::Validate;

fn default_region() -> String {
    "global".to_string()
}

fn default_datacenter() -> String {
    "dc1".to_string()
}

fn default_service_port_label() -> String {
    "waypoint".to_string()
}

/// Configuration for the deploy capability.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    /// Jobspec template text (JSON job document with `${var}` references).
    #[validate(length(min = 1, message = "jobspec template is required"))]
    pub jobspec: String,

    /// Extra template variables, layered over the built-in `NOMAD_VAR_*` set.
    #[serde(default)]
    pub job_vars: BTreeMap<String, String>,

    /// The Nomad region to deploy to, defaults to "global".
    #[serde(default = "default_region")]
    pub region: String,

    /// Whether `${file("...")}` references in the template may read local files.
    #[serde(default)]
    pub allow_fs: bool,

    /// The namespace of the job.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Environment variables that configure the application in a static way.
    /// This might control an image that has multiple modes of operation,
    /// selected via environment variable.
    #[serde(default)]
    pub static_environment: BTreeMap<String, String>,

    /// Port the service is listening on within the container.
    /// Defaults to port 3000.
    #[serde(default)]
    #[validate(range(min = 1, max = 65535, message = "service_port must be 1-65535"))]
    pub service_port: Option<u32>,
}

/// Configuration for the release capability.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Public domain the released job is attached to.
    #[validate(length(min = 1, message = "release domain is required"))]
    pub domain: String,

    /// Datacenter applied when the fetched job declares none, defaults to "dc1".
    #[serde(default = "default_datacenter")]
    pub datacenter: String,

    /// Replica count override for task groups that receive a routing rule.
    #[serde(default)]
    pub replicas: Option<u32>,

    /// Port label that selects a service by convention when no
    /// release-router sentinel tag is present. Defaults to "waypoint".
    #[serde(default = "default_service_port_label")]
    pub service_port_label: String,

    /// Extra tags appended (once) to every service that receives a routing rule.
    #[serde(default)]
    pub service_tags: Vec<String>,

    /// Whether to monitor the evaluation produced by the release registration.
    #[serde(default)]
    pub monitor: bool,
}
