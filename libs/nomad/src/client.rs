//! HTTP client for the Nomad API.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{Evaluation, Job, NomadConfig, NomadError};

const TOKEN_HEADER: &str = "X-Nomad-Token";

/// Client for job lookup, job registration, and evaluation queries.
///
/// No call retries; callers decide whether to retry. Lookup distinguishes
/// [`NomadError::JobNotFound`] from every other failure.
#[derive(Debug, Clone)]
pub struct NomadClient {
    http: reqwest::Client,
    base_url: String,
    region: Option<String>,
    namespace: Option<String>,
}

impl NomadClient {
    /// Create a client from an explicit config.
    pub fn new(config: NomadConfig) -> Result<Self, NomadError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(token)
                .map_err(|_| NomadError::InvalidConfig("token is not a valid header value".to_string()))?;
            headers.insert(TOKEN_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.address.trim_end_matches('/').to_string(),
            region: config.region,
            namespace: config.namespace,
        })
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Region/namespace query parameters shared by every call.
    fn scope(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(region) = &self.region {
            params.push(("region", region.as_str()));
        }
        if let Some(namespace) = &self.namespace {
            params.push(("namespace", namespace.as_str()));
        }
        params
    }

    /// Fetch a job by name.
    ///
    /// Returns [`NomadError::JobNotFound`] when the cluster has no job of
    /// that name; any other error propagates verbatim.
    pub async fn job(&self, name: &str) -> Result<Job, NomadError> {
        let response = self
            .http
            .get(self.url(&format!("/v1/job/{name}")))
            .query(&self.scope())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Submit a job definition for scheduling.
    ///
    /// Does not block for placement; returns the evaluation ID the scheduler
    /// assigned to this registration.
    pub async fn register(&self, job: &Job) -> Result<String, NomadError> {
        let response = self
            .http
            .post(self.url("/v1/jobs"))
            .query(&self.scope())
            .json(&RegisterRequest { job })
            .send()
            .await?;

        let result: RegisterResponse = self.handle_response(response).await?;
        if !result.warnings.is_empty() {
            tracing::warn!(warnings = %result.warnings, "nomad accepted the job with warnings");
        }
        Ok(result.eval_id)
    }

    /// Fetch the current status of an evaluation.
    pub async fn evaluation(&self, eval_id: &str) -> Result<Evaluation, NomadError> {
        let response = self
            .http
            .get(self.url(&format!("/v1/evaluation/{eval_id}")))
            .query(&self.scope())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Decode a success body or classify an error response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, NomadError> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            serde_json::from_slice(&body).map_err(|e| NomadError::Decode(e.to_string()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(NomadError::classify(status.as_u16(), &body))
        }
    }
}

/// Registration request body; Nomad expects the job nested under `Job`.
#[derive(Serialize)]
struct RegisterRequest<'a> {
    #[serde(rename = "Job")]
    job: &'a Job,
}

#[derive(Deserialize)]
struct RegisterResponse {
    #[serde(rename = "EvalID")]
    eval_id: String,

    #[serde(rename = "Warnings", default)]
    warnings: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_building_strips_trailing_slash() {
        let client = NomadClient::new(NomadConfig {
            address: "http://nomad.internal:4646/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.url("/v1/jobs"), "http://nomad.internal:4646/v1/jobs");
    }

    #[test]
    fn scope_includes_region_and_namespace() {
        let client = NomadClient::new(NomadConfig {
            address: "http://127.0.0.1:4646".to_string(),
            region: Some("global".to_string()),
            namespace: Some("apps".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.scope(),
            vec![("region", "global"), ("namespace", "apps")]
        );
    }
}
