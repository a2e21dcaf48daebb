//! Email template CRUD, proxied to the table store.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::api::error::ApiError;
use crate::app_state::SharedAppState;

const TABLE: &str = "email_templates";
const ID_COLUMN: &str = "template_id";

pub fn router() -> Router<SharedAppState> {
    Router::new()
        .route(
            "/templates",
            get(list_templates_handler).post(create_template_handler),
        )
        .route(
            "/templates/{template_id}",
            get(get_template_handler)
                .patch(update_template_handler)
                .delete(delete_template_handler),
        )
}

pub async fn list_templates_handler(
    State(state): State<SharedAppState>,
) -> Result<Json<Value>, ApiError> {
    let rows = state.supabase.select(TABLE, "*", None).await?;
    Ok(Json(rows))
}

pub async fn get_template_handler(
    State(state): State<SharedAppState>,
    Path(template_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let rows = state
        .supabase
        .select_by(TABLE, ID_COLUMN, &template_id)
        .await?;
    Ok(Json(rows))
}

pub async fn create_template_handler(
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

pub async fn update_template_handler(
    State(state): State<SharedAppState>,
    Path(template_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    if !body.is_object() {
        return Err(ApiError::ValidationFailed {
            field: "body".to_string(),
        });
    }
    state
        .supabase
        .update(TABLE, ID_COLUMN, &template_id, &body)
        .await?;
    Ok(Json(serde_json::json!({ "status": "updated" })))
}

pub async fn delete_template_handler(
    State(state): State<SharedAppState>,
    Path(template_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .supabase
        .delete(TABLE, ID_COLUMN, &template_id)
        .await?;
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
