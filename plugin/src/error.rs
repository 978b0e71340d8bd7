//! Error taxonomy for deploy, release, and rollout operations.
//!
//! Every error returns to the host immediately; nothing is swallowed to
//! continue a partial operation and nothing is retried here. Scheduler
//! error text is carried through unmodified.

use std::time::Duration;

use gangplank_nomad::{EvalStatus, NomadError};
use thiserror::Error;

use crate::env::EnvError;
use crate::template::TemplateError;

/// Failures of the deploy capability.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Malformed or missing configuration, surfaced before any network call.
    #[error("invalid deploy configuration: {0}")]
    Config(String),

    /// Template variable encoding failure.
    #[error(transparent)]
    Env(#[from] EnvError),

    /// Jobspec synthesis failure (syntax, undefined variable, fs access).
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Scheduler transport or API failure, propagated verbatim.
    #[error(transparent)]
    Nomad(#[from] NomadError),

    /// The evaluation reached a non-successful terminal state.
    #[error(transparent)]
    Rollout(#[from] RolloutError),
}

/// Failures of the release capability.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Malformed or missing configuration, surfaced before any network call.
    #[error("invalid release configuration: {0}")]
    Config(String),

    /// The deployment's job no longer exists in the cluster.
    #[error("release target job '{0}' not found")]
    TargetJobNotFound(String),

    /// A service carries more than one release-router sentinel tag, so the
    /// intended router is ambiguous.
    #[error("service '{service}' carries {count} release-router tags, expected at most one")]
    AmbiguousRouterTag { service: String, count: usize },

    /// Scheduler transport or API failure, propagated verbatim.
    #[error(transparent)]
    Nomad(#[from] NomadError),

    /// The release evaluation reached a non-successful terminal state.
    #[error(transparent)]
    Rollout(#[from] RolloutError),
}

/// Failures observed while monitoring an evaluation.
#[derive(Debug, Error)]
pub enum RolloutError {
    /// The evaluation reached `failed` or `canceled`. The ID is included so
    /// the operator can inspect the scheduler directly.
    #[error("evaluation {eval_id} finished {status}: {reason}")]
    EvalFailed {
        eval_id: String,
        status: EvalStatus,
        reason: String,
    },

    /// The configured monitor deadline elapsed before a terminal state.
    /// Only this engine's observation stops; the evaluation itself keeps
    /// running in the scheduler.
    #[error("gave up waiting for evaluation {eval_id} after {elapsed:?}")]
    DeadlineExceeded { eval_id: String, elapsed: Duration },

    /// A status poll failed.
    #[error(transparent)]
    Nomad(#[from] NomadError),
}
