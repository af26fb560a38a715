//! Reddit search client (client-credentials OAuth).

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use brandwhisper_core::AppConfig;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::SentimentError;
use crate::types::AnalysisRequest;

use super::{SearchItem, SearchPage, SearchProvider};

/// Connection settings for [`RedditClient`].
#[derive(Clone)]
pub struct RedditConfig {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
    /// Host serving `/api/v1/access_token`.
    pub auth_url: String,
    /// Host serving authenticated API calls.
    pub api_url: String,
    pub timeout_secs: u64,
}

impl RedditConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            client_id: config.reddit_client_id.clone(),
            client_secret: config.reddit_client_secret.clone(),
            user_agent: config.reddit_user_agent.clone(),
            auth_url: config.reddit_auth_url.clone(),
            api_url: config.reddit_api_url.clone(),
            timeout_secs: config.request_timeout_secs,
        }
    }
}

impl std::fmt::Debug for RedditConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditConfig")
            .field("client_id", &"[redacted]")
            .field("client_secret", &"[redacted]")
            .field("user_agent", &self.user_agent)
            .field("auth_url", &self.auth_url)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit search listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Post>,
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: Option<String>,
    selftext: Option<String>,
    score: Option<i64>,
    url: Option<String>,
    permalink: Option<String>,
    created_utc: Option<f64>,
}

/// Reddit API client holding an application-only access token.
///
/// The token is exchanged again when a search is rejected with 401, so a
/// long-lived client survives token expiry.
pub struct RedditClient {
    client: reqwest::Client,
    config: RedditConfig,
    token: RwLock<String>,
    api_url: String,
}

impl RedditClient {
    /// Create a new `RedditClient` by exchanging client credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Reddit`] if the HTTP client cannot be built or
    /// the token exchange is rejected, and [`SentimentError::Http`] if the
    /// token endpoint is unreachable.
    pub async fn new(config: &RedditConfig) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| SentimentError::Reddit(format!("failed to build HTTP client: {e}")))?;

        let token = Self::fetch_token(&client, config).await?;

        Ok(Self {
            client,
            config: config.clone(),
            token: RwLock::new(token),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn current_token(&self) -> String {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn refresh_token(&self) -> Result<String, SentimentError> {
        let token = Self::fetch_token(&self.client, &self.config).await?;
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token.clone();
        Ok(token)
    }

    async fn fetch_token(
        client: &reqwest::Client,
        config: &RedditConfig,
    ) -> Result<String, SentimentError> {
        let url = format!(
            "{}/api/v1/access_token",
            config.auth_url.trim_end_matches('/')
        );
        let response = client
            .post(url)
            .basic_auth(&config.client_id, Some(&config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SentimentError::Reddit(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token_resp: TokenResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::Reddit(format!("token parse error: {e}")))?;

        Ok(token_resp.access_token)
    }
}

impl SearchProvider for RedditClient {
    async fn search_page(
        &self,
        request: &AnalysisRequest,
        after: Option<&str>,
    ) -> Result<SearchPage, SentimentError> {
        let endpoint = format!(
            "{}/r/{}/search",
            self.api_url,
            request.scope.as_path_segment()
        );

        let mut params: Vec<(&str, String)> = vec![
            ("q", request.query.clone()),
            ("sort", request.sort.as_str().to_string()),
            ("t", "all".to_string()),
            ("limit", request.limit.to_string()),
            (
                "restrict_sr",
                if request.scope.is_all() { "false" } else { "true" }.to_string(),
            ),
            ("raw_json", "1".to_string()),
        ];
        if let Some(cursor) = after {
            params.push(("after", cursor.to_string()));
        }

        let mut response = self
            .client
            .get(&endpoint)
            .bearer_auth(self.current_token())
            .query(&params)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::info!(scope = %request.scope, "access token rejected; exchanging a new one");
            let token = self.refresh_token().await?;
            response = self
                .client
                .get(&endpoint)
                .bearer_auth(token)
                .query(&params)
                .send()
                .await?;
        }

        if !response.status().is_success() {
            return Err(SentimentError::Reddit(format!(
                "search in r/{} failed with status {}",
                request.scope,
                response.status()
            )));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| SentimentError::Reddit(format!("Reddit response parse error: {e}")))?;

        let items = listing
            .data
            .children
            .into_iter()
            .filter_map(|post| to_search_item(post.data))
            .collect();

        Ok(SearchPage {
            items,
            after: listing.data.after.filter(|cursor| !cursor.is_empty()),
        })
    }
}

/// Convert a raw post into a [`SearchItem`]. Posts without a title are skipped.
fn to_search_item(post: PostData) -> Option<SearchItem> {
    let title = post
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())?
        .to_string();

    let body = match post.selftext {
        Some(body) if body != "[deleted]" && body != "[removed]" => body,
        _ => String::new(),
    };

    let permalink = post
        .permalink
        .map(|p| format!("https://reddit.com{p}"));
    let url = post
        .url
        .filter(|u| !u.is_empty())
        .or(permalink)
        .unwrap_or_default();

    #[allow(clippy::cast_possible_truncation)]
    let created_at = post
        .created_utc
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs as i64, 0))
        .unwrap_or_default();

    Some(SearchItem {
        title,
        body,
        score: post.score.unwrap_or(0),
        url,
        created_at,
    })
}
