//! Retry handling for read-only RPC calls.
//!
//! Transient endpoint failures (timeouts, rate limits, bad gateways) are
//! retried with exponential backoff and jitter. Only reads go through this
//! path: a submitted-but-unconfirmed transaction must never be resubmitted
//! blindly, so the submit methods call the endpoint exactly once.

use std::{future::Future, time::Duration};

use log::{debug, warn};
use rand::Rng;

use crate::{
    constants::{
        DEFAULT_RETRY_BASE_DELAY_MS, DEFAULT_RETRY_MAX_ATTEMPTS, DEFAULT_RETRY_MAX_DELAY_MS,
        RETRY_JITTER_PERCENT,
    },
    models::ProviderError,
};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum retry attempts after the initial call.
    pub max_retries: u8,
    /// Base delay in milliseconds for exponential backoff.
    pub base_delay_ms: u64,
    /// Cap on the backoff delay in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_RETRY_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS,
        }
    }
}

/// Calculate the backoff delay for `attempt` (0 = first retry) with jitter.
pub fn calculate_retry_delay(attempt: u8, base_delay_ms: u64, max_delay_ms: u64) -> Duration {
    if base_delay_ms == 0 || max_delay_ms == 0 {
        return Duration::from_millis(0);
    }

    let multiplier = 1u64.checked_shl(attempt as u32).unwrap_or(u64::MAX);
    let delay_ms = base_delay_ms.saturating_mul(multiplier).min(max_delay_ms);

    apply_jitter(delay_ms)
}

fn apply_jitter(delay_ms: u64) -> Duration {
    let jitter_range = (delay_ms as f64 * RETRY_JITTER_PERCENT).floor() as u64;
    if jitter_range == 0 {
        return Duration::from_millis(delay_ms);
    }

    let mut rng = rand::rng();
    let jitter = rng.random_range(0..=jitter_range);
    let final_delay = if rng.random_bool(0.5) {
        delay_ms.saturating_add(jitter)
    } else {
        delay_ms.saturating_sub(jitter)
    };

    Duration::from_millis(final_delay)
}

/// Run a read-only RPC `operation`, retrying transient failures.
pub async fn retry_read_call<T, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    operation: F,
) -> Result<T, ProviderError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt: u8 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < config.max_retries => {
                let delay =
                    calculate_retry_delay(attempt, config.base_delay_ms, config.max_delay_ms);
                warn!(
                    "RPC operation '{}' failed transiently (attempt {}): {}; retrying in {:?}",
                    operation_name,
                    attempt + 1,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                debug!("RPC operation '{}' failed: {}", operation_name, err);
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config() -> RetryConfig {
        RetryConfig {
            max_retries: 3,
            base_delay_ms: 1,
            max_delay_ms: 4,
        }
    }

    #[test]
    fn test_delay_grows_exponentially_and_is_capped() {
        let base = 100;
        let max = 350;
        // Jitter is +-10%, so compare against widened bounds.
        let d0 = calculate_retry_delay(0, base, max).as_millis() as u64;
        assert!((90..=110).contains(&d0));
        let d1 = calculate_retry_delay(1, base, max).as_millis() as u64;
        assert!((180..=220).contains(&d1));
        let d3 = calculate_retry_delay(3, base, max).as_millis() as u64;
        assert!(d3 <= 385);
    }

    #[test]
    fn test_zero_delays_disable_backoff() {
        assert_eq!(calculate_retry_delay(5, 0, 0), Duration::from_millis(0));
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let calls = AtomicU32::new(0);
        let result = retry_read_call(&fast_config(), "get_code", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(ProviderError::Timeout)
                } else {
                    Ok(42u64)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_transient_errors_fail_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<u64, _> = retry_read_call(&fast_config(), "get_code", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ProviderError::Revert("nope".into())) }
        })
        .await;

        assert!(matches!(result, Err(ProviderError::Revert(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_are_exhausted() {
        let calls = AtomicU32::new(0);
        let result: Result<u64, _> = retry_read_call(&fast_config(), "get_code", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ProviderError::BadGateway) }
        })
        .await;

        assert!(matches!(result, Err(ProviderError::BadGateway)));
        // initial call + max_retries
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
