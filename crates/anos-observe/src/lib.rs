//! Observability setup for Anos: tracing subscriber initialization and
//! GenAI semantic-convention attribute names for provider-call spans.

pub mod genai_attrs;
pub mod tracing_setup;
