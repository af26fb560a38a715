//! Shared domain types and configuration for BrandWhisper.

pub mod app_config;
pub mod config;
pub mod opinions;
pub mod sentiment;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use opinions::{Opinion, Scope, SortMode};
pub use sentiment::{
    Grade, OverallSentiment, QualityReport, ScoreResult, SentimentCount, SentimentTally,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
