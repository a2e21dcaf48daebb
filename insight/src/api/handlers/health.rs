use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::app_state::SharedAppState;

/// Aggregated dependency health.
///
/// `200` with a `healthy` body when the database probe succeeds within its
/// timeout, `503` with a sanitized cause otherwise. The AI credential is
/// reported as configured/missing for operators, but has no say in
/// liveness.
pub async fn health_checker_handler(State(state): State<SharedAppState>) -> Response {
    let snapshot = state
        .prober
        .probe(state.settings.supabase.probe_timeout())
        .await;

    let ai_status = if state.settings.ai.is_configured() {
        "configured"
    } else {
        "missing"
    };

    if snapshot.is_healthy() {
        let body = serde_json::json!({
            "status": "healthy",
            "timestamp": snapshot.timestamp.to_rfc3339(),
            "uptime": state.uptime().as_secs_f64(),
            "environment": state.settings.environment,
            "services": {
                "database": "connected",
                "ai": ai_status,
            },
            "databaseLatencyMs": snapshot.latency.map(|l| l.as_millis() as u64),
        });
        (StatusCode::OK, Json(body)).into_response()
    } else {
        let body = serde_json::json!({
            "status": "unhealthy",
            "timestamp": snapshot.timestamp.to_rfc3339(),
            "error": snapshot.error,
        });
        (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
    }
}
