//! Nomad connection configuration.

use crate::NomadError;

/// Connection parameters for a Nomad cluster.
///
/// Read-only after construction; a clone of this struct is the only state
/// shared between concurrent deploy/release operations.
#[derive(Debug, Clone)]
pub struct NomadConfig {
    /// Base address of the Nomad HTTP API, e.g. `http://127.0.0.1:4646`.
    pub address: String,

    /// ACL token sent as `X-Nomad-Token`, if the cluster requires one.
    pub token: Option<String>,

    /// Region to scope queries and registrations to.
    pub region: Option<String>,

    /// Namespace to scope queries and registrations to.
    pub namespace: Option<String>,
}

impl Default for NomadConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:4646".to_string(),
            token: None,
            region: None,
            namespace: None,
        }
    }
}

impl NomadConfig {
    /// Build a config from the conventional Nomad environment variables
    /// (`NOMAD_ADDR`, `NOMAD_TOKEN`, `NOMAD_REGION`, `NOMAD_NAMESPACE`).
    ///
    /// Unset variables fall back to the defaults. This is a convenience for
    /// the CLI; library callers should construct the struct directly.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("NOMAD_ADDR") {
            if !addr.is_empty() {
                config.address = addr;
            }
        }
        config.token = std::env::var("NOMAD_TOKEN").ok().filter(|t| !t.is_empty());
        config.region = std::env::var("NOMAD_REGION").ok().filter(|r| !r.is_empty());
        config.namespace = std::env::var("NOMAD_NAMESPACE")
            .ok()
            .filter(|n| !n.is_empty());

        config
    }

    /// Validate the address shape before any request is made.
    pub(crate) fn validate(&self) -> Result<(), NomadError> {
        if self.address.is_empty() {
            return Err(NomadError::InvalidConfig(
                "nomad address cannot be empty".to_string(),
            ));
        }
        if !self.address.starts_with("http://") && !self.address.starts_with("https://") {
            return Err(NomadError::InvalidConfig(format!(
                "nomad address must be an http(s) URL, got '{}'",
                self.address
            )));
        }
        Ok(())
    }
}
