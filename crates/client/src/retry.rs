//! Generic retry-with-backoff helper.
//!
//! A reusable utility for transient transport failures. Checkout does not
//! use it: order placement has no idempotency key, so a blind retry could
//! double-order.

use std::future::Future;
use std::time::Duration;

/// Run `operation` up to `max_attempts` times, doubling the delay between
/// attempts and capping it at `max_delay`. Returns the first success or the
/// last error.
pub async fn retry_with_backoff<F, Fut, T, E>(
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay = initial_delay;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "operation failed, retrying in {delay:?}"
                );
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, max_delay);
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_returns_first_success() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, &str> =
            retry_with_backoff(3, Duration::from_millis(1), Duration::from_millis(4), || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move { if n < 1 { Err("transient") } else { Ok(n) } }
            })
            .await;

        assert_eq!(result, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, &str> =
            retry_with_backoff(3, Duration::from_millis(1), Duration::from_millis(4), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("still broken") }
            })
            .await;

        assert_eq!(result, Err("still broken"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
