//! Health and banner endpoints

use axum::{response::IntoResponse, Json};

use crate::models::HealthResponse;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// Root banner listing the demo endpoints
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "racelab request-state demo",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "unsafe": "/unsafe/{id}/{timeout_ms}",
            "safe_prototype": "/safe-prototype/{id}/{timeout_ms}",
            "safe_singleton": "/safe-singleton/{id}/{timeout_ms}",
            "health": "/health"
        },
        "notes": "timeout_ms is optional and defaults to 100"
    }))
}
