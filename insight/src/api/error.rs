//! The terminal stage of the gateway pipeline: every failure, wherever it
//! was first observed, is normalized here into a stable response shape and
//! status code. Internal causes are kept for the error reporter but never
//! echoed to the client.

use axum::http::StatusCode;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use insight_core::http::HttpError;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum ApiError {
    #[error("Origin not allowed")]
    OriginRejected,

    #[error("Rate limit exceeded")]
    RateLimitExceeded { retry_after: Duration },

    #[error("Upstream dependency unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Validation failed for field '{field}'")]
    ValidationFailed { field: String },

    #[error("Internal server error")]
    InternalFault(String),
}

/// The stable, client-safe form of a failure. Constructed once at the
/// boundary and not mutated afterwards.
#[derive(Clone, Debug)]
pub struct NormalizedError {
    pub kind: &'static str,
    pub status: StatusCode,
    pub message: &'static str,
    /// Seconds until the client may retry; only set for rate-limit rejections.
    pub retry_after: Option<u64>,
    /// Sanitized detail safe to show to the client.
    pub detail: Option<String>,
    /// Root cause for the error reporter. Never serialized to the client.
    pub cause: Option<String>,
}

impl ApiError {
    pub fn normalize(&self) -> NormalizedError {
        match self {
            ApiError::OriginRejected => NormalizedError {
                kind: "origin_rejected",
                status: StatusCode::FORBIDDEN,
                message: "Origin not allowed by CORS policy",
                retry_after: None,
                detail: None,
                cause: None,
            },
            ApiError::RateLimitExceeded { retry_after } => NormalizedError {
                kind: "rate_limit_exceeded",
                status: StatusCode::TOO_MANY_REQUESTS,
                message: "Too many requests, please retry later",
                retry_after: Some(retry_after.as_secs_f64().ceil() as u64),
                detail: None,
                cause: None,
            },
            ApiError::UpstreamUnavailable(cause) => NormalizedError {
                kind: "upstream_unavailable",
                status: StatusCode::BAD_GATEWAY,
                message: "Upstream dependency is unavailable",
                retry_after: None,
                detail: None,
                cause: Some(cause.clone()),
            },
            ApiError::ValidationFailed { field } => NormalizedError {
                kind: "validation_failed",
                status: StatusCode::BAD_REQUEST,
                message: "Request validation failed",
                retry_after: None,
                detail: Some(format!("invalid field: {field}")),
                cause: None,
            },
            ApiError::InternalFault(cause) => NormalizedError {
                kind: "internal_fault",
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Internal server error",
                retry_after: None,
                detail: None,
                cause: Some(cause.clone()),
            },
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        if let Some(api_error) = e.downcast_ref::<ApiError>() {
            return api_error.clone();
        }
        ApiError::InternalFault(e.to_string())
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::UpstreamUnavailable(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let normalized = self.normalize();

        let mut body = serde_json::json!({
            "status": "error",
            "timestamp": Utc::now().to_rfc3339(),
            "error": {
                "kind": normalized.kind,
                "message": normalized.message,
            },
        });
        if let Some(detail) = &normalized.detail {
            body["error"]["detail"] = serde_json::Value::String(detail.clone());
        }
        if let Some(retry_after) = normalized.retry_after {
            body["retryAfter"] = serde_json::Value::from(retry_after);
        }

        let mut response = (normalized.status, Json(body)).into_response();
        // The reporting layer picks the normalized error up from the
        // response extensions, so reporting stays off the response path.
        response.extensions_mut().insert(normalized);
        response
    }
}
