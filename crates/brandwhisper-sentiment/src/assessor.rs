//! Qualitative product-quality narrative.

use std::sync::Arc;

use brandwhisper_core::{QualityReport, Scope};

use crate::llm::{format_model_error, LanguageModel};
use crate::prompts::quality_prompt;
use crate::rate_limit::{retry_on_rate_limit, RetryPolicy};

/// Turns the classifier's summary into a short stakeholder-ready narrative.
pub struct QualityAssessor<L> {
    model: Arc<L>,
    retry: RetryPolicy,
}

impl<L: LanguageModel> QualityAssessor<L> {
    #[must_use]
    pub fn new(model: Arc<L>, retry: RetryPolicy) -> Self {
        Self { model, retry }
    }

    /// Ask for a 3–5 sentence quality assessment of `summary`.
    ///
    /// A failed call yields a report containing the formatted error.
    pub async fn assess(&self, summary: &str, scope: &Scope, query: &str) -> QualityReport {
        let prompt = quality_prompt(summary, scope, query);
        match retry_on_rate_limit(self.retry, || self.model.generate(&prompt)).await {
            Ok(text) => QualityReport(text.trim().to_string()),
            Err(e) => {
                tracing::warn!(scope = %scope, query, error = %e, "quality assessment failed");
                QualityReport(format_model_error(&e))
            }
        }
    }
}
