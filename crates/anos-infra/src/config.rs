//! Configuration loader for Anos.
//!
//! Reads an optional `anos.toml` and deserializes it into [`AppConfig`],
//! falling back to defaults when the file is missing or malformed. Environment
//! variables are layered on top by [`apply_env_overrides`].

use std::path::Path;

use anos_types::config::AppConfig;
use anos_types::error::ConfigError;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "anos.toml";

pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "HOST";
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "ANOS_MODEL";
pub const ENV_API_BASE_URL: &str = "ANOS_API_BASE_URL";

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Layer environment variables over `config`.
///
/// `lookup` resolves a variable name; production passes `std::env::var`,
/// tests pass a closure over a fixed map. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(port) = get(ENV_PORT) {
        config.port = port.trim().parse().map_err(|e| {
            tracing::warn!(value = %port, "Invalid {ENV_PORT}");
            ConfigError::InvalidValue {
                key: ENV_PORT.to_string(),
                message: format!("{e}"),
            }
        })?;
    }
    if let Some(host) = get(ENV_HOST) {
        config.host = host;
    }
    if let Some(key) = get(ENV_API_KEY) {
        config.api_key = Some(key);
    }
    if let Some(model) = get(ENV_MODEL) {
        config.model = model;
    }
    if let Some(url) = get(ENV_API_BASE_URL) {
        config.api_base_url = url;
    }

    Ok(())
}

/// Load `path` and apply overrides from the process environment.
pub async fn load_with_env(path: &Path) -> Result<AppConfig, ConfigError> {
    let mut config = load_config(path).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(DEFAULT_CONFIG_FILE)).await;
        assert_eq!(config.port, 3000);
        assert_eq!(config.history_cap, 10);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        tokio::fs::write(
            &path,
            r#"
port = 4000
model = "gemini-2.0-flash"
context_turns = 4

[generation]
temperature = 0.2
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.port, 4000);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.context_turns, 4);
        assert_eq!(config.generation.top_k, 40);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = AppConfig {
            port: 4000,
            ..AppConfig::default()
        };
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_PORT, "8081"),
                (ENV_HOST, "127.0.0.1"),
                (ENV_API_KEY, "key-from-env"),
                (ENV_MODEL, "gemini-2.0-flash"),
                (ENV_API_BASE_URL, "http://localhost:9999"),
            ]),
        )
        .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.listen_addr(), "127.0.0.1:8081");
        assert_eq!(config.api_key.as_deref(), Some("key-from-env"));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.api_base_url, "http://localhost:9999");
    }

    #[test]
    fn env_overrides_ignore_unset_and_empty() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, env(&[(ENV_API_KEY, ""), (ENV_PORT, "  ")])).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn env_override_invalid_port_is_error() {
        let mut config = AppConfig::default();
        let err = apply_env_overrides(&mut config, env(&[(ENV_PORT, "not-a-port")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_PORT));
        assert_eq!(config.port, 3000);
    }
}
