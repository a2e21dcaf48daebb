//! Origin admission control.
//!
//! The allow-list is loaded once at startup and fixed for the process
//! lifetime. The policy is a pure predicate; the transport wiring around it
//! comes in two parts: a request-phase gate that rejects disallowed origins
//! with a CORS-kind error, and a [`CorsLayer`] that echoes
//! `Access-Control-Allow-Origin` only for allow-listed origins and answers
//! preflights.

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::error::ApiError;

/// Immutable set of allowed origins.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: HashSet<String>,
}

impl OriginPolicy {
    pub fn new(origins: &[String]) -> Self {
        Self {
            allowed: origins.iter().cloned().collect(),
        }
    }

    /// Decide whether a request with this `Origin` header may proceed.
    ///
    /// An absent origin (same-origin navigation, curl, server-to-server) is
    /// always admitted; a present origin must be an exact member of the
    /// allow-list.
    pub fn admit(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed.contains(origin),
        }
    }
}

/// Request-phase gate: disallowed origins are rejected with a CORS-kind
/// error instead of being silently dropped.
pub async fn origin_middleware(
    State(policy): State<Arc<OriginPolicy>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    if !policy.admit(origin.as_deref()) {
        return Err(ApiError::OriginRejected);
    }

    Ok(next.run(request).await)
}

/// CORS response headers: the origin is echoed only when allow-listed,
/// credentials are allowed, preflights are cached for ten minutes.
pub fn cors_layer(policy: Arc<OriginPolicy>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin.to_str().map(|o| policy.admit(Some(o))).unwrap_or(false)
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .expose_headers([
            HeaderName::from_static("content-range"),
            HeaderName::from_static("x-content-range"),
        ])
        .max_age(Duration::from_secs(600))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> OriginPolicy {
        OriginPolicy::new(&[
            "http://localhost:3000".to_string(),
            "http://localhost:5173".to_string(),
        ])
    }

    #[test]
    fn test_absent_origin_is_always_admitted() {
        assert!(policy().admit(None));
    }

    #[test]
    fn test_listed_origin_is_admitted() {
        assert!(policy().admit(Some("http://localhost:3000")));
    }

    #[test]
    fn test_unlisted_origin_is_rejected() {
        assert!(!policy().admit(Some("http://evil.test")));
    }

    #[test]
    fn test_matching_is_exact_not_prefix() {
        assert!(!policy().admit(Some("http://localhost:30000")));
        assert!(!policy().admit(Some("https://localhost:3000")));
        assert!(!policy().admit(Some("http://localhost:3000/")));
    }

    #[test]
    fn test_empty_allow_list_rejects_every_origin() {
        let policy = OriginPolicy::new(&[]);
        assert!(policy.admit(None));
        assert!(!policy.admit(Some("http://localhost:3000")));
    }
}
