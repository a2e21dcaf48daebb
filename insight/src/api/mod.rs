pub mod cors;
pub mod error;
pub mod handlers;
pub mod rate_limiting;
pub mod reporting;
pub mod router;
