//! Bulk sentiment classification through a single model call.

use std::sync::Arc;

use brandwhisper_core::{Opinion, Scope, SentimentTally};

use crate::llm::{format_model_error, LanguageModel};
use crate::parser::ParsedReply;
use crate::prompts::sentiment_prompt;
use crate::rate_limit::{retry_on_rate_limit, RetryPolicy};

/// Counts opinions into positive/negative/neutral and summarizes them.
pub struct SentimentClassifier<L> {
    model: Arc<L>,
    retry: RetryPolicy,
}

impl<L: LanguageModel> SentimentClassifier<L> {
    #[must_use]
    pub fn new(model: Arc<L>, retry: RetryPolicy) -> Self {
        Self { model, retry }
    }

    /// Classify every opinion title in one request.
    ///
    /// Never fails: a model error becomes a zero tally whose summary is the
    /// formatted error, and a reply that does not follow the template becomes
    /// a zero tally whose summary is the raw reply.
    pub async fn classify(
        &self,
        opinions: &[Opinion],
        scope: &Scope,
        query: &str,
    ) -> SentimentTally {
        let prompt = sentiment_prompt(opinions, scope, query);

        let raw = match retry_on_rate_limit(self.retry, || self.model.generate(&prompt)).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    scope = %scope,
                    query,
                    error = %e,
                    "sentiment classification failed"
                );
                return SentimentTally::unparsed(format_model_error(&e));
            }
        };

        let parsed = ParsedReply::parse(&raw);
        match &parsed {
            ParsedReply::Structured(tally) => tracing::debug!(
                positive = tally.positive,
                negative = tally.negative,
                neutral = tally.neutral,
                opinions = opinions.len(),
                "parsed sentiment tally"
            ),
            ParsedReply::Unstructured { reason, .. } => tracing::warn!(
                %reason,
                "model reply did not follow the tally template; keeping raw text"
            ),
        }
        parsed.into_tally()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use chrono::Utc;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ScriptedModel {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        prompts: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl LanguageModel for ScriptedModel {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(LlmError::EmptyResponse("script exhausted".to_string())))
        }
    }

    fn opinions(titles: &[&str]) -> Vec<Opinion> {
        titles
            .iter()
            .map(|t| Opinion {
                title: (*t).to_string(),
                score: 1,
                url: String::new(),
                created_at: Utc::now(),
            })
            .collect()
    }

    fn scope() -> Scope {
        Scope::Community("nike".to_string())
    }

    #[tokio::test]
    async fn one_call_for_all_titles() {
        let model = ScriptedModel::new(vec![Ok(
            "Positive: 2\nNegative: 1\nNeutral: 0\nSummary: good".to_string()
        )]);
        let classifier = SentimentClassifier::new(Arc::clone(&model), RetryPolicy::new(Some(0), 0));
        let tally = classifier
            .classify(&opinions(&["a", "b", "c"]), &scope(), "shoes")
            .await;
        assert_eq!((tally.positive, tally.negative, tally.neutral), (2, 1, 0));
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("- a\n- b\n- c\n"));
    }

    #[tokio::test]
    async fn malformed_reply_degrades_to_raw_summary() {
        let raw = "Positive: 2\nNeutral: 0\nSummary: no negative line";
        let model = ScriptedModel::new(vec![Ok(raw.to_string())]);
        let classifier = SentimentClassifier::new(model, RetryPolicy::new(Some(0), 0));
        let tally = classifier.classify(&opinions(&["a"]), &scope(), "shoes").await;
        assert_eq!(tally, SentimentTally::unparsed(raw));
    }

    #[tokio::test]
    async fn api_error_becomes_error_summary() {
        let model = ScriptedModel::new(vec![Err(LlmError::Api {
            status: 400,
            message: "API key not valid".to_string(),
        })]);
        let classifier = SentimentClassifier::new(Arc::clone(&model), RetryPolicy::new(Some(3), 0));
        let tally = classifier.classify(&opinions(&["a"]), &scope(), "shoes").await;
        assert_eq!(tally.total(), 0);
        assert!(tally.summary.starts_with("Error from Gemini:"));
        assert!(tally.summary.contains("API key not valid"));
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_retries_same_prompt() {
        let model = ScriptedModel::new(vec![
            Err(LlmError::rate_limited("429 retry_delay { seconds: 12 }")),
            Ok("Positive: 1\nNegative: 0\nNeutral: 0\nSummary: ok".to_string()),
        ]);
        let classifier = SentimentClassifier::new(Arc::clone(&model), RetryPolicy::default());
        let started = tokio::time::Instant::now();
        let tally = classifier.classify(&opinions(&["a"]), &scope(), "shoes").await;
        assert_eq!(tally.positive, 1);
        assert_eq!(started.elapsed(), std::time::Duration::from_secs(12));
        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0], prompts[1]);
    }

    #[tokio::test]
    async fn exhausted_rate_limit_becomes_error_summary() {
        let model = ScriptedModel::new(vec![
            Err(LlmError::rate_limited("429")),
            Err(LlmError::rate_limited("429")),
        ]);
        let classifier = SentimentClassifier::new(model, RetryPolicy::new(Some(1), 0));
        let tally = classifier.classify(&opinions(&["a"]), &scope(), "shoes").await;
        assert_eq!(
            tally.summary,
            "Error from Gemini: rate limit hit repeatedly (2 attempts)"
        );
    }
}
