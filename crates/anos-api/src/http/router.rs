//! Axum router configuration with middleware.
//!
//! All routes are under `/api/`. Middleware: CORS (any origin), request
//! tracing.
//!
//! When a built web client exists at `web/` (configurable via
//! `ANOS_WEB_DIR`) it is served for every non-API path. If the directory
//! does not exist, only the API is served.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

pub const WEB_DIR_ENV: &str = "ANOS_WEB_DIR";
const DEFAULT_WEB_DIR: &str = "web";

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/chat", post(handlers::chat::chat))
        .route(
            "/history/{session_id}",
            get(handlers::history::get_history).delete(handlers::history::clear_history),
        );

    let mut router = Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let web_dir = std::env::var(WEB_DIR_ENV).unwrap_or_else(|_| DEFAULT_WEB_DIR.to_string());
    if std::path::Path::new(&web_dir).is_dir() {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "Static web client serving enabled");
    }

    router
}
