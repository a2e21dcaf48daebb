//! Request-phase admission gate.
//!
//! Mounted with `axum::middleware::from_fn_with_state`, one instance per
//! tier. Quota is consumed at admission time, before handler dispatch, and
//! is not refunded if the client later drops the connection.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use tracing::debug;

use super::extractors::client_key;
use super::quota::{Decision, RateLimiter};
use crate::api::error::ApiError;

pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = client_key(&request);

    match limiter.check(&key) {
        Decision::Admitted => Ok(next.run(request).await),
        Decision::Rejected { retry_after } => {
            debug!(
                tier = limiter.name(),
                key = %key,
                retry_after_secs = retry_after.as_secs(),
                "rate limit exceeded"
            );
            Err(ApiError::RateLimitExceeded { retry_after })
        }
    }
}
