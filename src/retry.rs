//! Cancellable bounded retry with exponential backoff.

use crate::error::{DocScannerError, Result};
use doc_scanner_common::RetryPolicy;
use std::future::Future;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Runs `operation` until it succeeds or `policy.max_attempts` is used up.
///
/// Every failure is treated as retryable. Cancelling `cancel` aborts both an
/// attempt in flight and a pending backoff wait, returning
/// `DocScannerError::Cancelled`. When all attempts fail the last error is
/// carried in `DocScannerError::RetriesExhausted`.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    cancel: &CancellationToken,
    mut operation: F,
) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        if cancel.is_cancelled() {
            return Err(DocScannerError::Cancelled);
        }

        debug!("attempt {}/{}", attempt, policy.max_attempts);
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DocScannerError::Cancelled),
            outcome = operation(attempt) => outcome,
        };

        let err = match outcome {
            Ok(value) => {
                info!("attempt {}/{} succeeded", attempt, policy.max_attempts);
                return Ok(value);
            }
            Err(DocScannerError::Cancelled) => return Err(DocScannerError::Cancelled),
            Err(err) => err,
        };

        let Some(delay) = policy.delay_after(attempt) else {
            warn!(
                "attempt {}/{} failed: {}; giving up",
                attempt, policy.max_attempts, err
            );
            return Err(DocScannerError::RetriesExhausted {
                attempts: attempt,
                last_error: err.to_string(),
            });
        };

        warn!(
            "attempt {}/{} failed: {}; retrying in {}ms",
            attempt,
            policy.max_attempts,
            err,
            delay.as_millis()
        );
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DocScannerError::Cancelled),
            _ = sleep(delay) => {}
        }
        attempt += 1;
    }
}
