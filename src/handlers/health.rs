use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::app::AppState;
use crate::middleware::ApiResponse;

/// GET /health - storage liveness
pub async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    let Some(database) = &state.database else {
        return ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "storage": "memory"
        }))
        .into_response();
    };

    match database.health_check().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "storage": "postgres"
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "message": "failed" }))).into_response()
        }
    }
}
