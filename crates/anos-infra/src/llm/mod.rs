//! LLM provider implementations.
//!
//! Contains the Gemini implementation of the [`LlmProvider`] trait defined
//! in `anos-core`, plus a factory ([`create_provider`]) that builds it from
//! [`AppConfig`].
//!
//! [`LlmProvider`]: anos_core::llm::provider::LlmProvider

pub mod gemini;

use std::time::Duration;

use secrecy::SecretString;

use anos_core::llm::box_provider::BoxLlmProvider;
use anos_types::config::AppConfig;

use self::gemini::GeminiProvider;

/// Create a [`BoxLlmProvider`] from the server configuration.
///
/// A missing or blank API key is not an error here: the server still starts
/// and each exchange fails with an authentication error instead.
pub fn create_provider(config: &AppConfig) -> BoxLlmProvider {
    let api_key = config
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(|key| SecretString::from(key.to_string()));

    if api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; chat requests will fail with 401");
    }

    let provider = GeminiProvider::new(api_key, Duration::from_secs(config.upstream_timeout_secs))
        .with_base_url(config.api_base_url.clone());
    BoxLlmProvider::new(provider)
}
