//! Analysis pipeline orchestration.

use std::sync::Arc;

use brandwhisper_core::{AppConfig, OverallSentiment, SentimentTally};

use crate::assessor::QualityAssessor;
use crate::classifier::SentimentClassifier;
use crate::error::SentimentError;
use crate::fetcher::OpinionFetcher;
use crate::llm::{GeminiClient, LanguageModel};
use crate::rate_limit::RetryPolicy;
use crate::scorer;
use crate::sources::{RedditClient, RedditConfig, SearchProvider};
use crate::types::{AnalysisBundle, AnalysisRequest, AnalysisStatus};

/// Runs fetch → classify → (score, assess) for one request at a time.
///
/// Provider clients are owned by the analyzer and reused across runs, so a
/// repeated request within the same process is served from the fetch cache.
pub struct Analyzer<S, L> {
    fetcher: OpinionFetcher<S>,
    classifier: SentimentClassifier<L>,
    assessor: QualityAssessor<L>,
}

impl Analyzer<RedditClient, GeminiClient> {
    /// Build an analyzer backed by Reddit and Gemini.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the Reddit token exchange fails or the
    /// Gemini client cannot be constructed.
    pub async fn from_config(config: &AppConfig) -> Result<Self, SentimentError> {
        let reddit = RedditClient::new(&RedditConfig::from_app_config(config)).await?;
        let gemini = GeminiClient::from_app_config(config)?;
        let retry = RetryPolicy::new(
            config.rate_limit_max_retries,
            config.rate_limit_default_delay_secs,
        );
        Ok(Self::new(reddit, gemini, retry))
    }
}

impl<S: SearchProvider, L: LanguageModel> Analyzer<S, L> {
    #[must_use]
    pub fn new(search: S, model: L, retry: RetryPolicy) -> Self {
        let model = Arc::new(model);
        Self {
            fetcher: OpinionFetcher::new(search),
            classifier: SentimentClassifier::new(Arc::clone(&model), retry),
            assessor: QualityAssessor::new(model, retry),
        }
    }

    /// Run the full analysis for one request.
    ///
    /// 1. Fetch opinions. If none are found, return a
    ///    [`AnalysisStatus::NoOpinionsFound`] bundle without calling the model.
    /// 2. Classify all titles in one model call.
    /// 3. Score the tally and assess quality from the tally's summary.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] only when fetching fails. Model failures are
    /// reported inside the bundle as error text.
    pub async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisBundle, SentimentError> {
        let opinions = self.fetcher.fetch(request).await?;

        if opinions.is_empty() {
            tracing::info!(
                scope = %request.scope,
                query = %request.query,
                "no opinions found; skipping analysis"
            );
            return Ok(AnalysisBundle::no_opinions(request));
        }

        let tally = self
            .classifier
            .classify(&opinions, &request.scope, &request.query)
            .await;

        let score = scorer::score(&tally);
        let overall = OverallSentiment::from_tally(&tally);
        let quality = self
            .assessor
            .assess(&tally.summary, &request.scope, &request.query)
            .await;

        tracing::info!(
            scope = %request.scope,
            query = %request.query,
            opinions = opinions.len(),
            percent = score.percent,
            grade = %score.grade,
            overall = %overall,
            "analysis complete"
        );

        Ok(AnalysisBundle {
            status: AnalysisStatus::Complete,
            scope: request.scope.clone(),
            query: request.query.clone(),
            summary_text: summary_text(request, &tally, overall),
            opinions,
            chart: tally.chart_rows(),
            tally: Some(tally),
            overall: Some(overall),
            quality: Some(quality),
            score: Some(score),
        })
    }
}

fn summary_text(
    request: &AnalysisRequest,
    tally: &SentimentTally,
    overall: OverallSentiment,
) -> String {
    format!(
        "### General opinions on '{}' from {}:\n\
         - **Positive Posts**: {}\n\
         - **Negative Posts**: {}\n\
         - **Neutral Posts**: {}\n\n\
         **Overall, the sentiment is _{overall}_**.",
        request.query, request.scope, tally.positive, tally.negative, tally.neutral
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandwhisper_core::Scope;

    #[test]
    fn summary_text_lists_counts_and_label() {
        let request = AnalysisRequest::new(Scope::Community("nike".to_string()), "shoes");
        let tally = SentimentTally {
            positive: 5,
            negative: 2,
            neutral: 1,
            summary: String::new(),
        };
        let text = summary_text(&request, &tally, OverallSentiment::Positive);
        assert!(text.starts_with("### General opinions on 'shoes' from nike:"));
        assert!(text.contains("- **Positive Posts**: 5\n"));
        assert!(text.contains("- **Negative Posts**: 2\n"));
        assert!(text.contains("- **Neutral Posts**: 1\n"));
        assert!(text.ends_with("**Overall, the sentiment is _positive_**."));
    }
}
