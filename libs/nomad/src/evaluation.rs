//! Evaluation status model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One asynchronous scheduling attempt for a registered job.
///
/// Evaluations are owned by the scheduler; this engine only observes them
/// and never persists one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Status")]
    pub status: EvalStatus,

    #[serde(rename = "StatusDescription", default)]
    pub status_description: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lifecycle: `pending`/`blocked` are in-flight, the rest are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalStatus {
    Pending,
    Blocked,
    Complete,
    Failed,
    Canceled,

    /// A status this client does not know about. Treated as in-flight so a
    /// newer scheduler cannot make the monitor report a false verdict.
    #[serde(other)]
    Unknown,
}

impl EvalStatus {
    /// Returns true once the scheduler will not change the status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed | Self::Canceled)
    }
}

impl std::fmt::Display for EvalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Blocked => "blocked",
            Self::Complete => "complete",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}
