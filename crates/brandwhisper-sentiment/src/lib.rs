//! Opinion-aggregation pipeline for BrandWhisper.
//!
//! Searches Reddit for posts about a product, classifies all of them with one
//! Gemini call, scores the resulting tally, and asks Gemini for a short
//! quality narrative. Results are returned as a serializable
//! [`AnalysisBundle`].

pub mod assessor;
pub mod classifier;
pub mod error;
pub mod fetcher;
pub mod llm;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod rate_limit;
pub mod scorer;
pub mod sources;
pub mod types;

pub use assessor::QualityAssessor;
pub use classifier::SentimentClassifier;
pub use error::{LlmError, SentimentError};
pub use fetcher::OpinionFetcher;
pub use llm::{GeminiClient, LanguageModel};
pub use parser::{MalformedReply, ParsedReply};
pub use pipeline::Analyzer;
pub use rate_limit::RetryPolicy;
pub use scorer::{grade_for_percent, score};
pub use sources::{RedditClient, RedditConfig, SearchItem, SearchPage, SearchProvider};
pub use types::{AnalysisBundle, AnalysisRequest, AnalysisStatus, MAX_LIMIT};
