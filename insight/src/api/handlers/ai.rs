//! Proxy to the AI completion provider, the most expensive upstream call.
//! Guarded by the strictest rate-limit tier.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::app_state::SharedAppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

pub fn router() -> Router<SharedAppState> {
    Router::new().route("/generate", post(generate_handler))
}

pub async fn generate_handler(
    State(state): State<SharedAppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    if request.prompt.trim().is_empty() {
        return Err(ApiError::ValidationFailed {
            field: "prompt".to_string(),
        });
    }

    let text = state.ai.generate(&request.prompt).await?;
    Ok(Json(serde_json::json!({
        "status": "success",
        "text": text,
    })))
}
