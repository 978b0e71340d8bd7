//! Evaluation rollout monitor.

use std::time::{Duration, Instant};

use gangplank_nomad::{EvalStatus, NomadClient};

use crate::error::RolloutError;
use crate::status::StatusReporter;

/// Default pause between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Drives an evaluation to a terminal outcome by polling its status.
///
/// This is the only long-running step in the pipeline. The loop is
/// interruptible by dropping the future (the caller's cancellation
/// context); at most one poll interval passes before the drop takes
/// effect, and the scheduler-side evaluation is never touched.
#[derive(Debug)]
pub struct EvalMonitor<'a> {
    client: &'a NomadClient,
    poll_interval: Duration,
    deadline: Option<Duration>,
}

impl<'a> EvalMonitor<'a> {
    pub fn new(client: &'a NomadClient) -> Self {
        Self {
            client,
            poll_interval: DEFAULT_POLL_INTERVAL,
            deadline: None,
        }
    }

    /// Override the pause between polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Give up (with [`RolloutError::DeadlineExceeded`]) once this much
    /// time has passed without a terminal state.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Poll until the evaluation reaches a terminal state.
    ///
    /// `complete` is success; `failed` and `canceled` surface as
    /// [`RolloutError::EvalFailed`] carrying the evaluation ID and the
    /// scheduler's last status description.
    pub async fn monitor(
        &self,
        eval_id: &str,
        status: &dyn StatusReporter,
    ) -> Result<(), RolloutError> {
        let started = Instant::now();

        loop {
            let eval = self.client.evaluation(eval_id).await?;

            match eval.status {
                EvalStatus::Complete => {
                    status.ok(&format!("Evaluation {eval_id} complete"));
                    return Ok(());
                }
                EvalStatus::Failed | EvalStatus::Canceled => {
                    let reason = if eval.status_description.is_empty() {
                        "no status description given".to_string()
                    } else {
                        eval.status_description
                    };
                    return Err(RolloutError::EvalFailed {
                        eval_id: eval_id.to_string(),
                        status: eval.status,
                        reason,
                    });
                }
                EvalStatus::Pending | EvalStatus::Blocked | EvalStatus::Unknown => {
                    status.update(&format!(
                        "Monitoring evaluation \"{eval_id}\" ({})",
                        eval.status
                    ));
                }
            }

            if let Some(deadline) = self.deadline {
                let elapsed = started.elapsed();
                if elapsed >= deadline {
                    return Err(RolloutError::DeadlineExceeded {
                        eval_id: eval_id.to_string(),
                        elapsed,
                    });
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
