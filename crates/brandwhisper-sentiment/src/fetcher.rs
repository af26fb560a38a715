//! Opinion retrieval with optional strict keyword filtering.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use brandwhisper_core::Opinion;

use crate::error::SentimentError;
use crate::sources::{SearchItem, SearchProvider};
use crate::types::{AnalysisRequest, MAX_LIMIT};

/// Upper bound on result pages read for one request. Guards against cursors
/// that never run out while the strict filter rejects everything.
const MAX_PAGES: usize = 10;

/// Collects opinions from a [`SearchProvider`], caching each distinct request
/// for the life of the fetcher.
pub struct OpinionFetcher<S> {
    provider: S,
    cache: Mutex<HashMap<AnalysisRequest, Vec<Opinion>>>,
}

impl<S: SearchProvider> OpinionFetcher<S> {
    #[must_use]
    pub fn new(provider: S) -> Self {
        Self {
            provider,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch up to `request.limit` opinions in provider order.
    ///
    /// With `request.strict`, a post is kept only if the query appears
    /// (case-insensitively) in its title or body. Reading stops once enough
    /// posts are accepted or the provider runs out. An empty result is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidLimit`] for a limit outside `1..=100`,
    /// or the provider's error if a page request fails.
    pub async fn fetch(&self, request: &AnalysisRequest) -> Result<Vec<Opinion>, SentimentError> {
        if request.limit == 0 || request.limit > MAX_LIMIT {
            return Err(SentimentError::InvalidLimit(request.limit));
        }

        if let Some(cached) = self.cached(request) {
            tracing::debug!(
                scope = %request.scope,
                query = %request.query,
                count = cached.len(),
                "serving opinions from cache"
            );
            return Ok(cached);
        }

        let limit = request.limit as usize;
        let needle = request.query.to_lowercase();
        let mut opinions = Vec::with_capacity(limit);
        let mut after: Option<String> = None;
        let mut examined = 0usize;

        'pages: for _ in 0..MAX_PAGES {
            let page = self.provider.search_page(request, after.as_deref()).await?;
            if page.items.is_empty() {
                break;
            }

            for item in page.items {
                examined += 1;
                if request.strict && !mentions_query(&item, &needle) {
                    continue;
                }
                opinions.push(to_opinion(item));
                if opinions.len() >= limit {
                    break 'pages;
                }
            }

            after = page.after;
            if after.is_none() {
                break;
            }
        }

        tracing::info!(
            scope = %request.scope,
            query = %request.query,
            sort = %request.sort,
            strict = request.strict,
            examined,
            kept = opinions.len(),
            "fetched opinions"
        );

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(request.clone(), opinions.clone());

        Ok(opinions)
    }

    fn cached(&self, request: &AnalysisRequest) -> Option<Vec<Opinion>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(request)
            .cloned()
    }
}

/// `needle` must already be lowercase.
fn mentions_query(item: &SearchItem, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle) || item.body.to_lowercase().contains(needle)
}

fn to_opinion(item: SearchItem) -> Opinion {
    Opinion {
        title: item.title,
        score: item.score,
        url: item.url,
        created_at: item.created_at,
    }
}
