//! Shared domain types for Anos.
//!
//! Turns, sessions, wire DTOs for the HTTP surface, LLM request/response
//! shapes, configuration, and the error enums shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
