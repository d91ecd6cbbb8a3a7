//! Polling a submitted job until it finishes.

use crate::error::{Result, StudioError};
use crate::video::client::VideoClient;
use crate::video::types::Operation;
use std::time::Duration;
use tokio::time::Instant;

/// Polls `operation` until it is done or `timeout` elapses.
///
/// Completion is checked before the deadline on every iteration, so an
/// operation that is already done is returned without sleeping or fetching,
/// and a job that finishes on the last fetch is never reported as a timeout.
/// Errors from the status fetch are returned as-is. A timeout too large to
/// be represented as a deadline means the job is polled until it finishes.
pub async fn wait_for_operation(
    client: &dyn VideoClient,
    operation: Operation,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<Operation> {
    if timeout.is_zero() || poll_interval.is_zero() {
        return Err(StudioError::Config(
            "timeout and poll interval must be positive".into(),
        ));
    }

    let start = Instant::now();
    let deadline = start.checked_add(timeout);
    let mut operation = operation;

    loop {
        if operation.done {
            return Ok(operation);
        }

        if deadline.is_some_and(|deadline| Instant::now() > deadline) {
            return Err(StudioError::Timeout(timeout));
        }

        tracing::debug!(
            operation = %operation.name,
            elapsed_secs = start.elapsed().as_secs(),
            "polling video generation"
        );
        tokio::time::sleep(poll_interval).await;
        operation = client.get_operation(&operation).await?;
    }
}
