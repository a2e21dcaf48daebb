//! Route table and gateway pipeline assembly.
//!
//! Per-request stage order: origin policy, api-wide limiter, route-tier
//! limiter, handler. Tier layers sit inside the api-wide layer, which sits
//! inside the origin gate; the error-reporting layer wraps everything so it
//! also sees gateway rejections.

use axum::middleware;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::api::cors::{cors_layer, origin_middleware, OriginPolicy};
use crate::api::handlers::health::health_checker_handler;
use crate::api::handlers::root::root_handler;
use crate::api::handlers::{ai, early_warning, email, segments};
use crate::api::rate_limiting::rate_limit_middleware;
use crate::api::reporting::ErrorReportingLayer;
use crate::app_state::SharedAppState;

pub struct ApiRoutes;

impl ApiRoutes {
    pub fn create(state: SharedAppState) -> Router {
        let origin_policy = Arc::new(OriginPolicy::new(&state.settings.api.allowed_origins));

        let query_routes = Router::new()
            .nest("/segments", segments::router())
            .nest("/email", email::router())
            .nest("/early-warning", early_warning::router())
            .layer(middleware::from_fn_with_state(
                state.limiters.query.clone(),
                rate_limit_middleware,
            ));

        let ai_routes = Router::new()
            .nest("/ai", ai::router())
            .layer(middleware::from_fn_with_state(
                state.limiters.ai.clone(),
                rate_limit_middleware,
            ));

        // The api-wide limiter is layered over both subtrees, so it runs
        // before the tier check and its rejection short-circuits first.
        let api_routes = Router::new()
            .merge(query_routes)
            .merge(ai_routes)
            .layer(middleware::from_fn_with_state(
                state.limiters.api.clone(),
                rate_limit_middleware,
            ));

        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_checker_handler))
            .nest("/api", api_routes)
            .layer(middleware::from_fn_with_state(
                origin_policy.clone(),
                origin_middleware,
            ))
            .layer(cors_layer(origin_policy))
            .layer(ErrorReportingLayer::new(state.reporter.clone()))
            .with_state(state)
    }
}
