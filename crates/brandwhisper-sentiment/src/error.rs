use thiserror::Error;

/// Errors that abort an analysis run.
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Reddit API error: {0}")]
    Reddit(String),

    #[error("invalid opinion limit {0}: must be between 1 and 100")]
    InvalidLimit(u32),

    #[error("language model client error: {0}")]
    Llm(#[from] LlmError),
}

/// Errors from a single language-model call.
///
/// Only [`LlmError::RateLimited`] is retried; everything else ends the call.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited (429): {message}")]
    RateLimited {
        /// Delay suggested by the provider, if one could be found.
        retry_after_secs: Option<u64>,
        message: String,
    },

    #[error("rate limit hit repeatedly ({attempts} attempts)")]
    RateLimitExhausted { attempts: u32 },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("response contained no text: {0}")]
    EmptyResponse(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl LlmError {
    /// Build a rate-limit error, reading the delay hint out of `message`.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        let message = message.into();
        LlmError::RateLimited {
            retry_after_secs: crate::rate_limit::retry_delay_hint(&message),
            message,
        }
    }
}
