//! Waits for every submission in a batch to reach a terminal state.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::{ExecutionClient, ExecutionResult, SubmissionToken};
use crate::config::ExecutionServiceConfig;
use crate::error::{EvaluationError, Result};

/// Bounded-interval batch poller.
///
/// Each orchestration run owns its own poll loop; loops share no state, so
/// a slow batch never blocks unrelated evaluations.
#[derive(Debug, Clone)]
pub struct BatchPoller {
    interval: Duration,
    max_rounds: u32,
}

impl BatchPoller {
    pub fn new(interval: Duration, max_rounds: u32) -> Self {
        Self {
            interval,
            max_rounds,
        }
    }

    pub fn from_config(config: &ExecutionServiceConfig) -> Self {
        Self::new(config.poll_interval(), config.max_poll_rounds)
    }

    /// Repeatedly fetches results for `tokens` until every status is
    /// terminal, sleeping `interval` between rounds. Returns results in
    /// token order.
    ///
    /// Transport errors are surfaced immediately, not retried: only pending
    /// statuses warrant another round. The loop stops with `Timeout` after
    /// `max_rounds` rounds and with `Cancelled` as soon as `cancel` fires;
    /// the remote jobs keep running server-side in both cases.
    pub async fn poll_until_done(
        &self,
        client: &dyn ExecutionClient,
        tokens: &[SubmissionToken],
        cancel: &CancellationToken,
    ) -> Result<Vec<ExecutionResult>> {
        for round in 1..=self.max_rounds {
            if cancel.is_cancelled() {
                return Err(EvaluationError::Cancelled);
            }

            let results = client.fetch_batch_results(tokens).await?;
            if results.len() != tokens.len() {
                return Err(EvaluationError::MalformedResponse(format!(
                    "poll round {round} returned {} results for {} tokens",
                    results.len(),
                    tokens.len()
                )));
            }

            let all_done = results
                .iter()
                .all(|result| result.execution_status().is_terminal());
            if all_done {
                debug!(round, count = results.len(), "batch reached terminal state");
                return Ok(results);
            }

            debug!(round, "batch still pending");
            if round < self.max_rounds {
                tokio::select! {
                    _ = cancel.cancelled() => return Err(EvaluationError::Cancelled),
                    _ = tokio::time::sleep(self.interval) => {}
                }
            }
        }

        Err(EvaluationError::Timeout {
            rounds: self.max_rounds,
        })
    }
}
