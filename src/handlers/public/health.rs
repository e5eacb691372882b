// handlers/public/health.rs - GET / and GET /api/health handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::server::AppState;

const SERVICE_NAME: &str = "sparplan-api";

/// GET / - Service information
pub async fn root_get() -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "ETF savings plan backend",
        "endpoints": {
            "health": "/api/health (public)",
            "etfs": "/etfs (public)",
            "auth": "/api/auth/register, /api/auth/login, /api/auth/reset-password (public)",
            "sparplaene": "/api/sparplaene[/:id] (protected)"
        }
    }))
}

/// GET /api/health - Liveness plus a store ping
pub async fn health_get(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = chrono::Utc::now();

    match state.users.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "UP",
                "service": SERVICE_NAME,
                "timestamp": timestamp,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "DOWN",
                    "service": SERVICE_NAME,
                    "timestamp": timestamp,
                    "database": "unavailable"
                })),
            )
        }
    }
}
