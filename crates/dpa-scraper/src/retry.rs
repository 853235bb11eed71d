//! Exponential back-off with jitter for transient fetch failures.
//!
//! Only rate limiting (HTTP 429) and network-level failures are retried.
//! Everything else is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound on a single back-off sleep.
const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` if `err` is transient and worth another attempt.
///
/// Retriable:
/// - [`ScraperError::RateLimited`]: the server asked us to back off.
/// - [`ScraperError::Http`]: connection reset, timeout, DNS hiccup.
fn is_retriable(err: &ScraperError) -> bool {
    matches!(
        err,
        ScraperError::RateLimited { .. } | ScraperError::Http(_)
    )
}

/// Runs `operation`, retrying up to `max_retries` more times on transient errors.
///
/// The wait before retry `n` (1-based) is `backoff_base_ms * 2^(n-1)` with
/// ±25 % jitter, capped at 30 s. With `max_retries = 2` the operation runs at
/// most 3 times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = jittered_delay_ms(backoff_base_ms, attempt);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient fetch error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

fn jittered_delay_ms(backoff_base_ms: u64, attempt: u32) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << (attempt.saturating_sub(1)).min(10));
    let capped = computed.min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
    delay_ms
}
