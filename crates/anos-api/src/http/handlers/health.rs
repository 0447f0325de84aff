//! GET /api/health

use axum::Json;
use chrono::Utc;

use anos_types::chat::HealthStatus;

pub const HEALTH_MESSAGE: &str = "Anos AI Server is running";

/// Liveness probe used by clients to toggle their online indicator.
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK".to_string(),
        message: HEALTH_MESSAGE.to_string(),
        timestamp: Utc::now(),
    })
}
