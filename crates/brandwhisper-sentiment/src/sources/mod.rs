//! Content-search providers.

mod reddit;

pub use reddit::{RedditClient, RedditConfig};

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::error::SentimentError;
use crate::types::AnalysisRequest;

/// One search hit as returned by a content provider, before filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchItem {
    pub title: String,
    /// Self-text of the post; empty for link posts.
    pub body: String,
    pub score: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// One page of search results plus the cursor for the next page.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub items: Vec<SearchItem>,
    /// `None` once the provider has nothing further.
    pub after: Option<String>,
}

/// A searchable forum-style content provider.
pub trait SearchProvider: Send + Sync {
    /// Fetch the page of results following `after` (or the first page),
    /// ordered by `request.sort` over all time.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] on network or provider failure.
    fn search_page(
        &self,
        request: &AnalysisRequest,
        after: Option<&str>,
    ) -> impl Future<Output = Result<SearchPage, SentimentError>> + Send;
}
