//! Error taxonomy for the Nomad client.

use thiserror::Error;

/// Errors returned by [`crate::NomadClient`].
#[derive(Debug, Error)]
pub enum NomadError {
    /// The named job does not exist in the cluster. Callers branch on this
    /// variant to choose create-vs-reuse behavior.
    #[error("job not found")]
    JobNotFound,

    /// Any other API-level failure. The message is the scheduler's own
    /// response body, surfaced unmodified so operators can cross-reference
    /// the Nomad UI and logs.
    #[error("nomad API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connection refused, TLS, timeout).
    #[error("nomad request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not decode as the expected shape.
    #[error("failed to decode nomad response: {0}")]
    Decode(String),

    /// The client configuration is unusable.
    #[error("invalid nomad client config: {0}")]
    InvalidConfig(String),
}

impl NomadError {
    /// Classify a non-success response into a typed error.
    ///
    /// This is the single place "job not found" is recognized. Nomad answers
    /// a missing job with 404 and the body `job not found`; some versions
    /// wrap the same text in a 500, so classification keys on the body, not
    /// the status code.
    pub(crate) fn classify(status: u16, body: &str) -> Self {
        let message = body.trim();
        if message.to_ascii_lowercase().contains("job not found") {
            return Self::JobNotFound;
        }
        Self::Api {
            status,
            message: if message.is_empty() {
                "unknown error".to_string()
            } else {
                message.to_string()
            },
        }
    }

    /// Returns true for the typed not-found case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::JobNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_404_not_found_body() {
        let err = NomadError::classify(404, "job not found\n");
        assert!(err.is_not_found());
    }

    #[test]
    fn classifies_500_not_found_quirk() {
        let err = NomadError::classify(500, "Unexpected response code: 500 (job not found)");
        assert!(err.is_not_found());
    }

    #[test]
    fn permission_denied_is_not_not_found() {
        let err = NomadError::classify(403, "Permission denied");
        assert!(!err.is_not_found());
        match err {
            NomadError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Permission denied");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_body_gets_placeholder_message() {
        match NomadError::classify(502, "") {
            NomadError::Api { message, .. } => assert_eq!(message, "unknown error"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
