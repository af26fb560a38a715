//! Generative-language providers.

mod gemini;

pub use gemini::GeminiClient;

use std::future::Future;

use crate::error::LlmError;

/// A text-in, text-out language model.
pub trait LanguageModel: Send + Sync {
    /// Send a single free-text prompt and return the completion text.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::RateLimited`] when the provider throttles the call
    /// and another [`LlmError`] variant for any other failure.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send;
}

/// Render a model failure the way it is shown in place of model output.
#[must_use]
pub fn format_model_error(err: &LlmError) -> String {
    format!("Error from Gemini: {err}")
}
