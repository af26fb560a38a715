//! Google Gemini `generateContent` client.

use std::time::Duration;

use brandwhisper_core::AppConfig;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::rate_limit::retry_delay_hint;

use super::LanguageModel;

/// Client for a single Gemini model.
///
/// Use [`GeminiClient::from_app_config`] for production or
/// [`GeminiClient::with_base_url`] to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if it has any.
    fn into_text(self) -> Result<String, LlmError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(LlmError::EmptyResponse(match block_reason {
                Some(reason) => format!("prompt blocked ({reason})"),
                None => "no candidates".to_string(),
            }));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse(format!(
                "finish reason {}",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(text)
    }
}

impl GeminiClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`GeminiClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, LlmError> {
        Self::with_base_url(
            &config.gemini_api_key,
            &config.gemini_model,
            config.request_timeout_secs,
            &config.gemini_base_url,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`LlmError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let raw = format!(
            "{}/v1beta/models/{model}:generateContent",
            base_url.trim_end_matches('/')
        );
        let endpoint = Url::parse(&raw).map_err(|e| LlmError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }
}

impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let header_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::RateLimited {
                retry_after_secs: retry_delay_hint(&body).or(header_secs),
                message: body,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.into_text()
    }
}

/// Pull `error.message` out of a Gemini error body, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_includes_model_and_strips_trailing_slash() {
        let client = GeminiClient::with_base_url("k", "gemini-1.5-pro-latest", 30, "http://x/")
            .expect("client construction should not fail");
        assert_eq!(
            client.endpoint.as_str(),
            "http://x/v1beta/models/gemini-1.5-pro-latest:generateContent"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = GeminiClient::with_base_url("k", "m", 30, "not a url");
        assert!(matches!(result, Err(LlmError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn error_message_extracted_from_json_body() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body), "API key not valid");
        assert_eq!(api_error_message("  plain text "), "plain text");
    }

    #[test]
    fn text_parts_are_concatenated() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Positive: 1\n"},{"text":"Summary: ok"}]},"finishReason":"STOP"}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_text().unwrap(), "Positive: 1\nSummary: ok");
    }

    #[test]
    fn blocked_prompt_is_empty_response() {
        let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        let err = parsed.into_text().unwrap_err();
        assert!(
            matches!(err, LlmError::EmptyResponse(ref msg) if msg.contains("SAFETY")),
            "unexpected error: {err:?}"
        );
    }
}
