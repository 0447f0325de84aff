//! Session-scoped conversation history.
//!
//! `SessionStore` is the port; `InMemorySessionStore` is the process-local
//! backing used by the server.

pub mod memory;
pub mod store;

pub use memory::InMemorySessionStore;
pub use store::SessionStore;
