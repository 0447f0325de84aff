//! LLM request/response types for Anos.
//!
//! Provider-agnostic shapes for a single text completion: the prompt, the
//! sampling parameters, the reply, and a structured error classification
//! that provider adapters must produce.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sampling parameters sent with every completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_k() -> u32 {
    40
}

fn default_top_p() -> f64 {
    0.95
}

fn default_max_output_tokens() -> u32 {
    1024
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Request to an LLM provider for a completion.
///
/// The whole conversation context is folded into `prompt` by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub generation: GenerationConfig,
}

/// Response from an LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub text: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    pub usage: Usage,
}

/// Token usage reported by the provider, when it reports any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from LLM provider operations.
///
/// Adapters classify failures here from status codes and structured error
/// payloads; callers never inspect message text to decide the category.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("provider returned no text")]
    EmptyResponse,

    #[error("provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },
}

/// Coarse category of an [`LlmError`], used for logging and mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    Auth,
    Quota,
    Other,
}

impl LlmError {
    pub fn kind(&self) -> LlmErrorKind {
        match self {
            LlmError::AuthenticationFailed(_) => LlmErrorKind::Auth,
            LlmError::QuotaExceeded(_) => LlmErrorKind::Quota,
            _ => LlmErrorKind::Other,
        }
    }
}

impl fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmErrorKind::Auth => write!(f, "auth"),
            LlmErrorKind::Quota => write!(f, "quota"),
            LlmErrorKind::Other => write!(f, "other"),
        }
    }
}
