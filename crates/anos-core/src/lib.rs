//! Business logic and port trait definitions for Anos.
//!
//! This crate defines the ports (`SessionStore`, `LlmProvider`) that the
//! infrastructure layer implements, plus the relay that orchestrates one chat
//! exchange. It depends on `anos-types` and on `anos-observe` for span
//! attribute names -- never on `anos-infra` or any HTTP crate.

pub mod context;
pub mod llm;
pub mod relay;
pub mod session;
