use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let reddit_client_id = require("REDDIT_CLIENT_ID")?;
    let reddit_client_secret = require("REDDIT_CLIENT_SECRET")?;
    let reddit_user_agent = require("REDDIT_USER_AGENT")?;
    let gemini_api_key = require("GEMINI_API_KEY")?;

    let gemini_model = or_default("BRANDWHISPER_GEMINI_MODEL", "gemini-1.5-pro-latest");
    let log_level = or_default("BRANDWHISPER_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("BRANDWHISPER_REQUEST_TIMEOUT_SECS", "30")?;
    let rate_limit_max_retries = parse_max_retries(&or_default(
        "BRANDWHISPER_RATE_LIMIT_MAX_RETRIES",
        "5",
    ))?;
    let rate_limit_default_delay_secs =
        parse_u64("BRANDWHISPER_RATE_LIMIT_DEFAULT_DELAY_SECS", "60")?;

    let reddit_auth_url = or_default("BRANDWHISPER_REDDIT_AUTH_URL", "https://www.reddit.com");
    let reddit_api_url = or_default("BRANDWHISPER_REDDIT_API_URL", "https://oauth.reddit.com");
    let gemini_base_url = or_default(
        "BRANDWHISPER_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );

    Ok(AppConfig {
        reddit_client_id,
        reddit_client_secret,
        reddit_user_agent,
        reddit_auth_url,
        reddit_api_url,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        log_level,
        request_timeout_secs,
        rate_limit_max_retries,
        rate_limit_default_delay_secs,
    })
}

/// Parse the retry cap. `unbounded` disables the cap entirely.
fn parse_max_retries(raw: &str) -> Result<Option<u32>, ConfigError> {
    if raw.eq_ignore_ascii_case("unbounded") {
        return Ok(None);
    }
    raw.parse::<u32>()
        .map(Some)
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "BRANDWHISPER_RATE_LIMIT_MAX_RETRIES".to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
