//! Retry mechanism for transient move failures
//!
//! Runs an operation up to a configured number of attempts with a fixed
//! delay between them, retrying only errors the taxonomy marks retryable.
//! The inter-attempt wait is cancellation-aware; shutdown never waits out
//! a pending delay.

use crate::error::MoveError;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Fixed-delay retry policy for per-file moves
#[derive(Debug, Clone)]
pub struct RetryPolicy {
	/// Total attempts, including the first (always at least 1)
	pub max_attempts: u32,
	/// Fixed delay between attempts
	pub delay: Duration,
}

impl RetryPolicy {
	pub fn new(max_attempts: u32, delay: Duration) -> Self {
		Self {
			max_attempts: max_attempts.max(1),
			delay,
		}
	}

	/// Execute an operation with retry logic
	///
	/// Returns the final result along with the number of attempts
	/// consumed. Cancellation during the inter-attempt wait surfaces the
	/// last error rather than starting another attempt.
	pub async fn run<T, F>(
		&self, cancel: &CancellationToken, operation_name: &str, mut operation_fn: F,
	) -> (std::result::Result<T, MoveError>, u32)
	where
		F: FnMut() -> std::result::Result<T, MoveError>,
	{
		let mut attempt = 1u32;

		loop {
			match operation_fn() {
				Ok(result) => {
					if attempt > 1 {
						debug!(
							"Operation '{}' succeeded on attempt {}",
							operation_name, attempt
						);
					}
					return (Ok(result), attempt);
				}
				Err(error) => {
					if !error.is_retryable() {
						debug!(
							"Operation '{}' failed with non-retryable error: {}",
							operation_name, error
						);
						return (Err(error), attempt);
					}

					if attempt >= self.max_attempts {
						warn!(
							"Operation '{}' failed after {} attempt(s), giving up: {}",
							operation_name, attempt, error
						);
						return (Err(error), attempt);
					}

					warn!(
						"Operation '{}' failed (attempt {}), retrying in {:?}: {}",
						operation_name, attempt, self.delay, error
					);

					tokio::select! {
						_ = cancel.cancelled() => {
							debug!(
								"Operation '{}' abandoned by shutdown after attempt {}",
								operation_name, attempt
							);
							return (Err(error), attempt);
						}
						_ = tokio::time::sleep(self.delay) => {}
					}

					attempt += 1;
				}
			}
		}
	}
}
