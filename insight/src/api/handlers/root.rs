use axum::{response::IntoResponse, Json};

/// Liveness echo, kept outside the `/api` rate-limit tree.
pub async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "insight-backend",
        "version": insight_core::version::version(),
    }))
}
