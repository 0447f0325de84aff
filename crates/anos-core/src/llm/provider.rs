//! LlmProvider trait definition.
//!
//! This is the core abstraction that completion backends implement.
//! Uses RPITIT for `complete`; `BoxLlmProvider` adds dynamic dispatch.

use anos_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for text-completion backends (Gemini, test doubles, ...).
///
/// Implementations must classify failures into the structured [`LlmError`]
/// variants; the relay maps them to client-facing errors by variant alone.
///
/// Implementations live in anos-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
