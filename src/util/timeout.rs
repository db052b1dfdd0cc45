//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::CalChatError;

/// Wrap a future with a timeout.
///
/// A timed-out call surfaces as `CalChatError::Timeout`, which classifies as
/// a transient remote failure.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, CalChatError>>,
) -> Result<T, CalChatError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(CalChatError::Timeout(duration.as_millis() as u64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_fast_futures() {
        let result = with_timeout(Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn times_out_slow_futures() {
        let result: Result<(), _> = with_timeout(Duration::from_millis(5), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(CalChatError::Timeout(_))));
    }
}
