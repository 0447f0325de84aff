//! Server configuration types for Anos.
//!
//! `AppConfig` represents the optional `anos.toml` plus environment
//! overrides. All fields have defaults, so an empty file (or no file) yields
//! a runnable server on port 3000.

use serde::{Deserialize, Serialize};

use crate::llm::GenerationConfig;

/// Maximum turns retained per session.
pub const DEFAULT_HISTORY_CAP: usize = 10;

/// Most recent turns sent to the provider as context.
pub const DEFAULT_CONTEXT_TURNS: usize = 6;

/// Gemini model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upstream API key. Usually supplied via `GEMINI_API_KEY` instead.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    #[serde(default = "default_context_turns")]
    pub context_turns: usize,

    /// Upper bound on one provider call, in seconds.
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,

    #[serde(default)]
    pub generation: GenerationConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_history_cap() -> usize {
    DEFAULT_HISTORY_CAP
}

fn default_context_turns() -> usize {
    DEFAULT_CONTEXT_TURNS
}

fn default_upstream_timeout_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_key: None,
            model: default_model(),
            api_base_url: default_api_base_url(),
            history_cap: default_history_cap(),
            context_turns: default_context_turns(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
            generation: GenerationConfig::default(),
        }
    }
}

impl AppConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.history_cap, 10);
        assert_eq!(config.context_turns, 6);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.api_key.is_none());
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.generation.top_k, 40);
        assert_eq!(config.upstream_timeout_secs, 60);
    }

    #[test]
    fn test_deserialize_with_values() {
        let toml_str = r#"
port = 8080
model = "gemini-2.0-flash"
history_cap = 20

[generation]
temperature = 0.3
max_output_tokens = 512
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.history_cap, 20);
        assert_eq!(config.context_turns, 6);
        assert!((config.generation.temperature - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.generation.max_output_tokens, 512);
        assert_eq!(config.generation.top_k, 40);
    }

    #[test]
    fn test_api_key_never_serialized() {
        let config = AppConfig {
            api_key: Some("secret".to_string()),
            ..AppConfig::default()
        };
        let out = toml::to_string(&config).unwrap();
        assert!(!out.contains("secret"));
    }
}
