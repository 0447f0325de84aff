//! HTTP layer for the Anos relay.
//!
//! Axum routes under `/api/`, plain JSON bodies, open CORS, and optional
//! static file serving for a built web client.

pub mod error;
pub mod handlers;
pub mod router;
