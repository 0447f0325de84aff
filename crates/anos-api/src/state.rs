//! Application state wiring the relay together.
//!
//! The relay is generic over its session store; AppState pins it to the
//! in-memory store and the configured Gemini provider.

use std::sync::Arc;

use anos_core::llm::box_provider::BoxLlmProvider;
use anos_core::relay::{RelayConfig, RelayService};
use anos_core::session::InMemorySessionStore;
use anos_infra::llm::create_provider;
use anos_types::config::AppConfig;

pub type ConcreteRelayService = RelayService<InMemorySessionStore>;

/// Shared application state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConcreteRelayService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire the relay with the provider described by `config`.
    pub fn init(config: AppConfig) -> Self {
        let provider = create_provider(&config);
        Self::with_provider(config, provider)
    }

    /// Wire the relay with an explicit provider.
    pub fn with_provider(config: AppConfig, provider: BoxLlmProvider) -> Self {
        let store = InMemorySessionStore::with_cap(config.history_cap);
        let relay = RelayService::new(store, provider, RelayConfig::from(&config));
        Self {
            relay: Arc::new(relay),
            config: Arc::new(config),
        }
    }
}
