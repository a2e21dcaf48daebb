//! Churn-risk alerts (read-heavy; alerts are produced elsewhere).

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::Value;

use crate::api::error::ApiError;
use crate::app_state::SharedAppState;

const TABLE: &str = "churn_alerts";
const ID_COLUMN: &str = "alert_id";

pub fn router() -> Router<SharedAppState> {
    Router::new()
        .route("/alerts", get(list_alerts_handler))
        .route("/alerts/{alert_id}", get(get_alert_handler))
        .route("/alerts/{alert_id}/ack", patch(ack_alert_handler))
}

pub async fn list_alerts_handler(
    State(state): State<SharedAppState>,
) -> Result<Json<Value>, ApiError> {
    let rows = state.supabase.select(TABLE, "*", None).await?;
    Ok(Json(rows))
}

pub async fn get_alert_handler(
    State(state): State<SharedAppState>,
    Path(alert_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let rows = state
        .supabase
        .select_by(TABLE, ID_COLUMN, &alert_id)
        .await?;
    Ok(Json(rows))
}

pub async fn ack_alert_handler(
    State(state): State<SharedAppState>,
    Path(alert_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .supabase
        .update(
            TABLE,
            ID_COLUMN,
            &alert_id,
            &serde_json::json!({ "acknowledged": true }),
        )
        .await?;
    Ok(Json(serde_json::json!({ "status": "acknowledged" })))
}
