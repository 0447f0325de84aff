//! GeminiProvider -- concrete [`LlmProvider`] implementation for Google Gemini.
//!
//! Sends a single-content `generateContent` request and classifies failures
//! structurally from the HTTP status and Google's error envelope (`status`
//! and `details[].reason`), never from free-text messages.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use anos_core::llm::provider::LlmProvider;
use anos_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

use super::types::{
    Content, ErrorEnvelope, GeminiGenerationConfig, GenerateContentRequest,
    GenerateContentResponse, Part,
};

/// Default Gemini REST base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini LLM provider.
///
/// A provider built without a key still constructs; every call then fails
/// with [`LlmError::AuthenticationFailed`] so the server can start and report
/// the misconfiguration per request.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    request_timeout: Duration,
}

impl GeminiProvider {
    pub fn new(api_key: Option<SecretString>, request_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    fn to_gemini_request(request: &CompletionRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.generation.temperature,
                top_k: request.generation.top_k,
                top_p: request.generation.top_p,
                max_output_tokens: request.generation.max_output_tokens,
            },
        }
    }
}

/// Map a non-success response to a structured [`LlmError`].
///
/// Google reports an invalid key as 400 `INVALID_ARGUMENT` with reason
/// `API_KEY_INVALID`, a missing or revoked one as 401/403.
pub(crate) fn classify_error(status: StatusCode, body: &str) -> LlmError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let (api_status, message, key_invalid) = match &envelope {
        Some(env) => (
            env.error.status.as_str(),
            env.error.message.clone(),
            env.error
                .details
                .iter()
                .any(|d| d.reason.as_deref() == Some("API_KEY_INVALID")),
        ),
        None => ("", body.to_string(), false),
    };

    if key_invalid
        || matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        || matches!(api_status, "UNAUTHENTICATED" | "PERMISSION_DENIED")
    {
        return LlmError::AuthenticationFailed(message);
    }

    if status == StatusCode::TOO_MANY_REQUESTS || api_status == "RESOURCE_EXHAUSTED" {
        return LlmError::QuotaExceeded(message);
    }

    LlmError::Provider {
        status: status.as_u16(),
        message,
    }
}

// GeminiProvider intentionally does NOT derive Debug; the key stays out of logs.

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            LlmError::AuthenticationFailed("no Gemini API key configured".to_string())
        })?;

        let body = Self::to_gemini_request(request);
        let url = self.url(&request.model);
        tracing::debug!(model = %request.model, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.request_timeout.as_secs())
                } else {
                    LlmError::Transport(format!("HTTP request failed: {e}"))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(classify_error(status, &text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let content = parsed.first_text().ok_or(LlmError::EmptyResponse)?;
        let finish_reason = parsed
            .candidates
            .first()
            .and_then(|c| c.finish_reason.clone());
        let usage = parsed.usage_metadata.clone().unwrap_or_default();

        Ok(CompletionResponse {
            text: content,
            model: parsed
                .model_version
                .clone()
                .unwrap_or_else(|| request.model.clone()),
            finish_reason,
            usage: Usage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
            },
        })
    }
}
