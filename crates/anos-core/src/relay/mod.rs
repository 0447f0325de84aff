//! Chat relay: one user message in, one provider reply out, with the
//! session store updated around the provider call.

pub mod locks;
pub mod service;

pub use service::{RelayConfig, RelayService};
