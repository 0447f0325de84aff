//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! Used with `Span::record` to fill the `Empty` fields of a provider-call
//! span after the call returns. Fields known up front are declared inline as
//! dotted identifiers in `info_span!`.
//!
//! Provider-call spans are named after the operation (`"chat"`); the model is
//! carried in `gen_ai.request.model`.

/// The number of input tokens consumed.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

/// The number of output tokens generated.
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// The finish reason reported by the provider (e.g., "STOP").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

/// Error category when the call failed ("auth", "quota", "other").
pub const ERROR_KIND: &str = "error.kind";

// --- Operation name values ---

/// Standard chat completion operation.
pub const OP_CHAT: &str = "chat";
