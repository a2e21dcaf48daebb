//! CRUD over customer segments. Thin proxies to the table store: gateway
//! concerns (CORS, rate limiting) never live here.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::api::error::ApiError;
use crate::app_state::SharedAppState;

const TABLE: &str = "segments";
const ID_COLUMN: &str = "segment_id";

pub fn router() -> Router<SharedAppState> {
    Router::new()
        .route("/", get(list_segments_handler).post(create_segment_handler))
        .route(
            "/{segment_id}",
            get(get_segment_handler)
                .patch(update_segment_handler)
                .delete(delete_segment_handler),
        )
}

pub async fn list_segments_handler(
    State(state): State<SharedAppState>,
) -> Result<Json<Value>, ApiError> {
    let rows = state.supabase.select(TABLE, "*", None).await?;
    Ok(Json(rows))
}

pub async fn get_segment_handler(
    State(state): State<SharedAppState>,
    Path(segment_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let rows = state
        .supabase
        .select_by(TABLE, ID_COLUMN, &segment_id)
        .await?;
    Ok(Json(rows))
}

pub async fn create_segment_handler(
    State(state): State<SharedAppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    if !body.is_object() {
        return Err(ApiError::ValidationFailed {
            field: "body".to_string(),
        });
    }
    let created = state.supabase.insert(TABLE, &body).await?;
    Ok(Json(created))
}

pub async fn update_segment_handler(
    State(state): State<SharedAppState>,
    Path(segment_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    if !body.is_object() {
        return Err(ApiError::ValidationFailed {
            field: "body".to_string(),
        });
    }
    state
        .supabase
        .update(TABLE, ID_COLUMN, &segment_id, &body)
        .await?;
    Ok(Json(serde_json::json!({ "status": "updated" })))
}

pub async fn delete_segment_handler(
    State(state): State<SharedAppState>,
    Path(segment_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.supabase.delete(TABLE, ID_COLUMN, &segment_id).await?;
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
