//! Tiered rate limiting for the API surface.
//!
//! Three fixed-window limiters guard the routes, all keyed by client
//! address:
//! - `api` — coarse ceiling over everything under `/api`
//! - `query` — segment/email/early-warning endpoints
//! - `ai` — AI completion endpoints
//!
//! A request crosses the `api` limiter first and then its route tier; the
//! first rejection short-circuits with that limiter's retry hint. Each
//! limiter owns an independent quota store.

pub mod extractors;
pub mod middleware;
pub mod quota;

pub use middleware::rate_limit_middleware;
pub use quota::{Decision, QuotaStore, RateLimitPolicy, RateLimiter};

use insight_core::settings::rate_limiting::RateLimitingConfig;
use std::sync::Arc;

/// The three configured limiter instances, shared across requests.
#[derive(Clone)]
pub struct RateLimiters {
    pub api: Arc<RateLimiter>,
    pub query: Arc<RateLimiter>,
    pub ai: Arc<RateLimiter>,
}

impl RateLimiters {
    pub fn from_config(config: &RateLimitingConfig) -> Self {
        let build = |name, tier| {
            let policy = RateLimitPolicy::from_tier(name, tier);
            if config.enabled {
                Arc::new(RateLimiter::new(policy))
            } else {
                Arc::new(RateLimiter::disabled(policy))
            }
        };

        Self {
            api: build("api", &config.api),
            query: build("query", &config.query),
            ai: build("ai", &config.ai),
        }
    }
}
