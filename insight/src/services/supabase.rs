//! Minimal client for the Supabase PostgREST surface.
//!
//! Only the handful of operations the CRUD handlers and the health probe
//! need. Not a general PostgREST binding.

use insight_core::http::{HttpClient, HttpError};
use insight_core::settings::supabase::SupabaseSettings;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: HttpClient,
    base_url: Option<String>,
}

impl SupabaseClient {
    pub fn new(settings: &SupabaseSettings) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &settings.api_key {
            let key = key.expose_secret();
            headers.insert("apikey", HeaderValue::from_str(key)?);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {key}"))?,
            );
        }
        // PostgREST returns the written rows only when asked to.
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let http = HttpClient::builder()
            .with_timeout(Duration::from_secs(10))
            .with_default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: settings
                .url
                .as_deref()
                .filter(|u| !u.is_empty())
                .map(|u| u.trim_end_matches('/').to_string()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn rest_url(&self, table: &str) -> Result<String, HttpError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| HttpError::http(503, "Supabase is not configured"))?;
        Ok(format!("{base}/rest/v1/{table}"))
    }

    /// Fetch rows from a table.
    pub async fn select(
        &self,
        table: &str,
        columns: &str,
        limit: Option<u32>,
    ) -> Result<Value, HttpError> {
        let mut url = format!("{}?select={}", self.rest_url(table)?, columns);
        if let Some(limit) = limit {
            url.push_str(&format!("&limit={limit}"));
        }
        self.http.get_json(&url).await
    }

    /// Fetch a single row, used by the liveness probe.
    pub async fn select_one(&self, table: &str, column: &str) -> Result<Value, HttpError> {
        self.select(table, column, Some(1)).await
    }

    /// Fetch rows matching `column = value`.
    pub async fn select_by(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Value, HttpError> {
        let url = format!(
            "{}?select=*&{}=eq.{}",
            self.rest_url(table)?,
            column,
            value
        );
        self.http.get_json(&url).await
    }

    /// Insert a row and return the written representation.
    pub async fn insert(&self, table: &str, body: &Value) -> Result<Value, HttpError> {
        let url = self.rest_url(table)?;
        self.http.post_json(&url, body).await
    }

    /// Update rows matching `column = value`.
    pub async fn update(
        &self,
        table: &str,
        column: &str,
        value: &str,
        body: &Value,
    ) -> Result<(), HttpError> {
        let url = format!("{}?{}=eq.{}", self.rest_url(table)?, column, value);
        self.http.patch_json(&url, body).await?;
        Ok(())
    }

    /// Delete rows matching `column = value`.
    pub async fn delete(&self, table: &str, column: &str, value: &str) -> Result<(), HttpError> {
        let url = format!("{}?{}=eq.{}", self.rest_url(table)?, column, value);
        self.http.delete(&url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(url: &str) -> SupabaseSettings {
        SupabaseSettings {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_select_builds_postgrest_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/segments"))
            .and(query_param("select", "segment_id"))
            .and(query_param("limit", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"segment_id": "s-1"}])),
            )
            .mount(&server)
            .await;

        let client = SupabaseClient::new(&settings_for(&server.uri())).unwrap();
        let rows = client.select_one("segments", "segment_id").await.unwrap();
        assert_eq!(rows[0]["segment_id"], "s-1");
    }

    #[tokio::test]
    async fn test_unconfigured_client_reports_unavailable() {
        let client = SupabaseClient::new(&SupabaseSettings::default()).unwrap();
        assert!(!client.is_configured());

        let err = client.select_one("segments", "segment_id").await.unwrap_err();
        assert_eq!(err.status_code(), Some(503));
    }

    #[tokio::test]
    async fn test_upstream_error_preserves_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = SupabaseClient::new(&settings_for(&server.uri())).unwrap();
        let err = client.select_one("segments", "segment_id").await.unwrap_err();
        assert!(err.is_server_error());
    }
}
