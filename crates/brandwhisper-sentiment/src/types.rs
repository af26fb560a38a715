use brandwhisper_core::{
    Opinion, OverallSentiment, QualityReport, ScoreResult, Scope, SentimentCount, SentimentTally,
    SortMode,
};
use serde::Serialize;

/// Largest number of opinions one run may analyze.
pub const MAX_LIMIT: u32 = 100;

/// Everything the caller chooses for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AnalysisRequest {
    pub scope: Scope,
    /// Search keyword, usually a product or topic.
    pub query: String,
    pub sort: SortMode,
    /// Maximum opinions to collect, in `1..=100`.
    pub limit: u32,
    /// Keep only posts whose title or body mentions `query`.
    pub strict: bool,
}

impl AnalysisRequest {
    /// A request with the form defaults: relevance sort, strict filter, 100 posts.
    #[must_use]
    pub fn new(scope: Scope, query: impl Into<String>) -> Self {
        Self {
            scope,
            query: query.into(),
            sort: SortMode::default(),
            limit: MAX_LIMIT,
            strict: true,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Complete,
    /// The search returned nothing usable; no model calls were made.
    NoOpinionsFound,
}

/// Final, serializable output of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisBundle {
    pub status: AnalysisStatus,
    pub scope: Scope,
    pub query: String,
    /// Headline text: counts and overall label, or the no-results marker.
    pub summary_text: String,
    pub opinions: Vec<Opinion>,
    /// Positive/Negative/Neutral rows for a bar chart. Empty when no opinions.
    pub chart: Vec<SentimentCount>,
    pub tally: Option<SentimentTally>,
    pub overall: Option<OverallSentiment>,
    pub quality: Option<QualityReport>,
    pub score: Option<ScoreResult>,
}

impl AnalysisBundle {
    /// Bundle for a search that produced no opinions.
    #[must_use]
    pub fn no_opinions(request: &AnalysisRequest) -> Self {
        Self {
            status: AnalysisStatus::NoOpinionsFound,
            scope: request.scope.clone(),
            query: request.query.clone(),
            summary_text: "No opinions found.".to_string(),
            opinions: Vec::new(),
            chart: Vec::new(),
            tally: None,
            overall: None,
            quality: None,
            score: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status == AnalysisStatus::NoOpinionsFound
    }

    /// The model's prose summary, empty when no analysis ran.
    #[must_use]
    pub fn brand_summary(&self) -> &str {
        self.tally.as_ref().map_or("", |t| t.summary.as_str())
    }
}
