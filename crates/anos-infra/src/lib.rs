//! Infrastructure layer for Anos.
//!
//! Implements the ports defined in `anos-core` against real services: the
//! Gemini `generateContent` API over HTTP, plus configuration loading from
//! `anos.toml` and the environment.

pub mod config;
pub mod llm;
