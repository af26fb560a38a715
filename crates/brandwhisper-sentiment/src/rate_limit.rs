//! Rate-limit recovery for language-model calls.
//!
//! [`retry_on_rate_limit`] re-issues the same request after the provider's
//! suggested delay whenever the call fails with [`LlmError::RateLimited`].
//! Every other error is returned on the spot.

use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::error::LlmError;

/// `retry_delay { seconds: N }` as printed by the Gemini client libraries.
static RETRY_DELAY_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"retry_delay\s*\{\s*seconds:\s*(\d+)").expect("valid retry_delay regex")
});

/// `"retryDelay": "12s"` from the REST error body's `RetryInfo` detail.
static RETRY_DELAY_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""retryDelay"\s*:\s*"(\d+)(?:\.\d+)?s""#).expect("valid retryDelay regex")
});

/// How rate-limited calls are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt. `None` never gives up.
    pub max_retries: Option<u32>,
    /// Pause used when the provider gives no delay hint.
    pub default_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: Some(5),
            default_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: Option<u32>, default_delay_secs: u64) -> Self {
        Self {
            max_retries,
            default_delay: Duration::from_secs(default_delay_secs),
        }
    }
}

/// Extract the provider-suggested delay, in whole seconds, from an error payload.
#[must_use]
pub fn retry_delay_hint(payload: &str) -> Option<u64> {
    RETRY_DELAY_BLOCK
        .captures(payload)
        .or_else(|| RETRY_DELAY_JSON.captures(payload))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Runs `operation`, sleeping and retrying while it reports a rate limit.
///
/// The wait before each retry is the error's `retry_after_secs`, or
/// `policy.default_delay` when the provider did not say. Once
/// `policy.max_retries` retries have been spent the call ends with
/// [`LlmError::RateLimitExhausted`].
pub(crate) async fn retry_on_rate_limit<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut retries = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(LlmError::RateLimited {
                retry_after_secs, ..
            }) => {
                if policy.max_retries.is_some_and(|max| retries >= max) {
                    return Err(LlmError::RateLimitExhausted {
                        attempts: retries + 1,
                    });
                }
                retries += 1;
                let delay = retry_after_secs.map_or(policy.default_delay, Duration::from_secs);
                tracing::warn!(
                    attempt = retries,
                    max_retries = ?policy.max_retries,
                    delay_secs = delay.as_secs(),
                    "language model rate limit hit; waiting before retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
