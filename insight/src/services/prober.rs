//! Bounded liveness probe against the table store.
//!
//! The probe is the only long-running operation in the gateway; it is always
//! wrapped in an explicit timeout and never lets an error escape — every
//! fault becomes an `Unhealthy` snapshot with a sanitized cause.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use insight_core::http::HttpError;
use serde::Serialize;
use std::time::{Duration, Instant};

use super::supabase::SupabaseClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of a single probe invocation. Produced fresh every time,
/// never persisted.
#[derive(Debug, Clone)]
pub struct HealthSnapshot {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub latency: Option<Duration>,
    pub error: Option<String>,
}

impl HealthSnapshot {
    pub fn healthy(latency: Duration) -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp: Utc::now(),
            latency: Some(latency),
            error: None,
        }
    }

    pub fn unhealthy(cause: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            timestamp: Utc::now(),
            latency: None,
            error: Some(cause.into()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Narrow seam over the upstream liveness check so tests can substitute
/// deterministic fast/slow/failing probers.
#[async_trait]
pub trait DependencyProber: Send + Sync {
    async fn probe(&self, timeout: Duration) -> HealthSnapshot;
}

/// Probes Supabase by selecting a single row from a known table.
pub struct SupabaseProber {
    client: SupabaseClient,
    table: String,
    column: String,
}

impl SupabaseProber {
    pub fn new(client: SupabaseClient, table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            column: column.into(),
        }
    }
}

/// Map an upstream failure to a short operator-facing cause. Upstream
/// payloads are not forwarded verbatim.
fn sanitize_cause(err: &HttpError) -> String {
    match err {
        HttpError::Http { status: 503, .. } => "database is not configured".to_string(),
        HttpError::Http { status, .. } => format!("database returned HTTP {status}"),
        HttpError::Network(_) => "database is unreachable".to_string(),
        HttpError::Timeout => "database request timed out".to_string(),
        HttpError::ParseError(_) => "database returned an unexpected response".to_string(),
    }
}

#[async_trait]
impl DependencyProber for SupabaseProber {
    async fn probe(&self, timeout: Duration) -> HealthSnapshot {
        let started = Instant::now();

        match tokio::time::timeout(timeout, self.client.select_one(&self.table, &self.column))
            .await
        {
            Ok(Ok(_)) => HealthSnapshot::healthy(started.elapsed()),
            Ok(Err(err)) => {
                tracing::warn!("Health probe failed: {}", err);
                HealthSnapshot::unhealthy(sanitize_cause(&err))
            }
            Err(_) => HealthSnapshot::unhealthy(format!(
                "database probe timed out after {}ms",
                timeout.as_millis()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::settings::supabase::SupabaseSettings;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prober_for(url: &str) -> SupabaseProber {
        let settings = SupabaseSettings {
            url: Some(url.to_string()),
            ..Default::default()
        };
        let client = SupabaseClient::new(&settings).unwrap();
        SupabaseProber::new(client, "segments", "segment_id")
    }

    #[tokio::test]
    async fn test_probe_success_records_latency() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let snapshot = prober_for(&server.uri())
            .probe(Duration::from_secs(2))
            .await;
        assert!(snapshot.is_healthy());
        assert!(snapshot.latency.is_some());
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_probe_failure_is_unhealthy_with_sanitized_cause() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string("stack trace: secret internals"),
            )
            .mount(&server)
            .await;

        let snapshot = prober_for(&server.uri())
            .probe(Duration::from_secs(2))
            .await;
        assert!(!snapshot.is_healthy());
        let cause = snapshot.error.unwrap();
        assert_eq!(cause, "database returned HTTP 500");
        assert!(!cause.contains("secret internals"));
    }

    #[tokio::test]
    async fn test_probe_timeout_is_unhealthy_not_pending() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let snapshot = prober_for(&server.uri())
            .probe(Duration::from_millis(50))
            .await;
        assert!(!snapshot.is_healthy());
        assert!(snapshot.error.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_unconfigured_store_probes_unhealthy() {
        let client = SupabaseClient::new(&SupabaseSettings::default()).unwrap();
        let prober = SupabaseProber::new(client, "segments", "segment_id");

        let snapshot = prober.probe(Duration::from_secs(1)).await;
        assert!(!snapshot.is_healthy());
        assert_eq!(snapshot.error.unwrap(), "database is not configured");
    }
}
