#[derive(Clone)]
pub struct AppConfig {
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_user_agent: String,
    pub reddit_auth_url: String,
    pub reddit_api_url: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Maximum rate-limit retries per model call. `None` retries until the
    /// provider stops throttling.
    pub rate_limit_max_retries: Option<u32>,
    /// Pause used when a rate-limit response carries no delay hint.
    pub rate_limit_default_delay_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("reddit_client_id", &"[redacted]")
            .field("reddit_client_secret", &"[redacted]")
            .field("reddit_user_agent", &self.reddit_user_agent)
            .field("reddit_auth_url", &self.reddit_auth_url)
            .field("reddit_api_url", &self.reddit_api_url)
            .field("gemini_api_key", &"[redacted]")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("rate_limit_max_retries", &self.rate_limit_max_retries)
            .field(
                "rate_limit_default_delay_secs",
                &self.rate_limit_default_delay_secs,
            )
            .finish()
    }
}
