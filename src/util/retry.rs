//! Fixed-delay retry for transient remote faults.

use std::future::Future;
use std::time::Duration;

use crate::error::CalChatError;

/// Retry policy: a bounded number of attempts with a fixed delay between them.
///
/// Only errors reporting `is_retryable()` are retried; business-rule
/// rejections and validation failures return immediately.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }

    /// Execute an async operation, retrying transient failures.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, CalChatError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CalChatError>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if !e.is_retryable() || attempt >= self.max_attempts {
                        return Err(e);
                    }
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Retrying after transient failure"
                    );
                    tokio::time::sleep(self.delay).await;
                }
            }
        }
    }
}
