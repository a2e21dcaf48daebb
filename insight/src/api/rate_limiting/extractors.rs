use axum::extract::ConnectInfo;
use axum::http::Request;
use std::net::SocketAddr;

/// Key used when no client identity can be determined at all. All such
/// requests share one quota bucket, which fails closed rather than open.
const FALLBACK_KEY: &str = "unknown";

/// Extract the client key used to bucket quota.
///
/// Proxy headers win over the peer address so per-client limiting stays
/// correct behind nginx or a cloud load balancer: leftmost
/// `X-Forwarded-For` entry, then `X-Real-IP`, then the peer socket address.
pub fn client_key<B>(req: &Request<B>) -> String {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }

    if let Some(real_ip) = req
        .headers()
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return real_ip.to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| FALLBACK_KEY.to_string())
}
