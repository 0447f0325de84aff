//! Relay service orchestrating one chat exchange.
//!
//! Order of effects for `handle_chat`:
//! 1. validate the message (no state touched on failure)
//! 2. append the user turn
//! 3. build the prompt from the most recent turns
//! 4. call the provider under a timeout
//! 5. append the assistant turn only on success
//!
//! A failed provider call therefore leaves the user turn in history and no
//! assistant turn.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::field::{display, Empty};
use tracing::{error, info, info_span, warn, Instrument};

use anos_observe::genai_attrs::{
    ERROR_KIND, GEN_AI_RESPONSE_FINISH_REASONS, GEN_AI_USAGE_INPUT_TOKENS,
    GEN_AI_USAGE_OUTPUT_TOKENS, OP_CHAT,
};
use anos_types::chat::{ChatReply, Turn, DEFAULT_SESSION_ID};
use anos_types::config::{AppConfig, DEFAULT_CONTEXT_TURNS, DEFAULT_MODEL};
use anos_types::error::RelayError;
use anos_types::llm::{CompletionRequest, GenerationConfig, LlmError, LlmErrorKind};

use crate::context::PromptBuilder;
use crate::llm::box_provider::BoxLlmProvider;
use crate::relay::locks::SessionLocks;
use crate::session::store::SessionStore;

/// Client-facing message for a missing or empty chat message.
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Per-exchange settings for the relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub model: String,
    pub generation: GenerationConfig,
    /// Most recent turns included in the prompt.
    pub context_turns: usize,
    /// Upper bound on one provider call.
    pub upstream_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            generation: GenerationConfig::default(),
            context_turns: DEFAULT_CONTEXT_TURNS,
            upstream_timeout: Duration::from_secs(60),
        }
    }
}

impl From<&AppConfig> for RelayConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            model: config.model.clone(),
            generation: config.generation.clone(),
            context_turns: config.context_turns,
            upstream_timeout: Duration::from_secs(config.upstream_timeout_secs),
        }
    }
}

/// Mediates between chat requests, the session store, and the provider.
///
/// Generic over `SessionStore` so the in-memory store can be swapped for a
/// persistent one without touching this logic.
pub struct RelayService<S: SessionStore> {
    store: S,
    provider: BoxLlmProvider,
    prompt: PromptBuilder,
    locks: SessionLocks,
    config: RelayConfig,
}

impl<S: SessionStore> RelayService<S> {
    pub fn new(store: S, provider: BoxLlmProvider, config: RelayConfig) -> Self {
        Self {
            store,
            provider,
            prompt: PromptBuilder::new(config.context_turns),
            locks: SessionLocks::new(),
            config,
        }
    }

    /// Access the session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Run one chat exchange.
    ///
    /// `session_id` falls back to [`DEFAULT_SESSION_ID`]. Exchanges on the
    /// same session are serialized; different sessions run concurrently.
    pub async fn handle_chat(
        &self,
        message: Option<&str>,
        session_id: Option<&str>,
    ) -> Result<ChatReply, RelayError> {
        let message = match message {
            Some(m) if !m.is_empty() => m,
            _ => return Err(RelayError::Validation(MESSAGE_REQUIRED.to_string())),
        };
        let session_id = session_id.unwrap_or(DEFAULT_SESSION_ID);

        let _guard = self.locks.acquire(session_id).await;
        let start = Instant::now();

        self.store.append_turn(session_id, Turn::user(message)).await?;
        let history = self.store.get_history(session_id).await?;

        let request = CompletionRequest {
            model: self.config.model.clone(),
            prompt: self.prompt.build(&history, message),
            generation: self.config.generation.clone(),
        };

        let span = info_span!(
            "chat",
            gen_ai.operation.name = OP_CHAT,
            gen_ai.provider.name = %self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.temperature = request.generation.temperature,
            gen_ai.request.max_tokens = request.generation.max_output_tokens,
            gen_ai.usage.input_tokens = Empty,
            gen_ai.usage.output_tokens = Empty,
            gen_ai.response.finish_reasons = Empty,
            error.kind = Empty,
            session_id = %session_id,
        );

        let timeout = self.config.upstream_timeout;
        let outcome = match tokio::time::timeout(timeout, self.provider.complete(&request))
            .instrument(span.clone())
            .await
        {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(timeout.as_secs())),
        };

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                let kind = e.kind();
                span.record(ERROR_KIND, display(kind));
                match kind {
                    LlmErrorKind::Auth => {
                        error!(session_id, error = %e, "Provider rejected the API credential")
                    }
                    LlmErrorKind::Quota => {
                        warn!(session_id, error = %e, "Provider quota exceeded")
                    }
                    LlmErrorKind::Other => {
                        error!(session_id, error = %e, "Provider call failed")
                    }
                }
                return Err(e.into());
            }
        };

        span.record(GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
        span.record(GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);
        if let Some(reason) = response.finish_reason.as_deref() {
            span.record(GEN_AI_RESPONSE_FINISH_REASONS, reason);
        }

        self.store
            .append_turn(session_id, Turn::assistant(response.text.clone()))
            .await?;

        info!(
            session_id,
            reply_chars = response.text.chars().count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Chat exchange completed"
        );

        Ok(ChatReply {
            reply: response.text,
            session_id: session_id.to_string(),
            timestamp: Utc::now(),
        })
    }

    /// Current turns for a session; empty for unknown sessions.
    pub async fn history(&self, session_id: &str) -> Result<Vec<Turn>, RelayError> {
        Ok(self.store.get_history(session_id).await?)
    }

    /// Drop a session's history. Idempotent.
    pub async fn clear_history(&self, session_id: &str) -> Result<(), RelayError> {
        self.store.clear(session_id).await?;
        self.locks.remove_if_idle(session_id);
        info!(session_id, "Conversation history cleared");
        Ok(())
    }
}
