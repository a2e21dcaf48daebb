//! Client for the AI completion provider (Gemini-style REST surface).

use insight_core::http::{HttpClient, HttpError};
use insight_core::settings::ai::AiSettings;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct AiClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
}

impl AiClient {
    pub fn new(settings: &AiSettings) -> anyhow::Result<Self> {
        let http = HttpClient::with_timeout(Duration::from_secs(settings.timeout_secs))?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }

    /// Point the client at a different endpoint. Test seam.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run a completion for the given prompt and return the generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String, HttpError> {
        let key = self
            .api_key
            .as_ref()
            .ok_or_else(|| HttpError::http(503, "AI provider is not configured"))?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            key.expose_secret()
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response: Value = self.http.post_json(&url, &body).await?;

        response["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                HttpError::ParseError("completion response had no text candidate".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn configured_settings() -> AiSettings {
        AiSettings {
            api_key: Some(SecretString::from("test-key".to_string())),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generate_extracts_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/models/.*:generateContent$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "three segments look at risk" }] } }
                ]
            })))
            .mount(&server)
            .await;

        let client = AiClient::new(&configured_settings())
            .unwrap()
            .with_base_url(server.uri());
        let text = client.generate("summarize churn").await.unwrap();
        assert_eq!(text, "three segments look at risk");
    }

    #[tokio::test]
    async fn test_generate_without_credential_is_unavailable() {
        let client = AiClient::new(&AiSettings::default()).unwrap();
        assert!(!client.is_configured());

        let err = client.generate("hello").await.unwrap_err();
        assert_eq!(err.status_code(), Some(503));
    }

    #[tokio::test]
    async fn test_generate_malformed_response_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = AiClient::new(&configured_settings())
            .unwrap()
            .with_base_url(server.uri());
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, HttpError::ParseError(_)));
    }
}
