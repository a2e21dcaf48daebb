use reqwest::{header::HeaderMap, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::error::HttpError;

/// Thin wrapper around [`reqwest::Client`] with a default timeout and
/// default headers, returning [`HttpError`] instead of raw reqwest errors.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    default_timeout: Duration,
}

pub struct HttpClientBuilder {
    timeout: Option<Duration>,
    headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self {
            timeout: None,
            headers: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn build(self) -> anyhow::Result<HttpClient> {
        let mut client_builder = reqwest::Client::builder();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(headers) = self.headers {
            client_builder = client_builder.default_headers(headers);
        }

        let client = client_builder.build()?;

        Ok(HttpClient {
            client,
            default_timeout: self.timeout.unwrap_or(Duration::from_secs(10)),
        })
    }
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    pub fn new() -> anyhow::Result<Self> {
        Self::builder().build()
    }

    pub fn with_timeout(timeout: Duration) -> anyhow::Result<Self> {
        Self::builder().with_timeout(timeout).build()
    }

    /// Extract a short error message from an unsuccessful response body.
    async fn extract_error_message(response: Response) -> String {
        let status = response.status();

        match response.text().await {
            Ok(body) => {
                if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
                    if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
                        return format!("{}: {}", status, message);
                    }
                }
                if !body.is_empty() && body.len() < 500 {
                    return format!("{}: {}", status, body);
                }
                format!("HTTP error: {}", status)
            }
            Err(_) => format!("HTTP error: {}", status),
        }
    }

    async fn check_status(response: Response) -> Result<Response, HttpError> {
        let status = response.status();
        if !status.is_success() {
            let message = Self::extract_error_message(response).await;
            return Err(HttpError::from_status(status, message));
        }
        Ok(response)
    }

    /// Make a GET request.
    pub async fn get(&self, url: &str) -> Result<Response, HttpError> {
        debug!("GET request to {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.default_timeout)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Make a GET request and deserialize the JSON response.
    pub async fn get_json<T>(&self, url: &str) -> Result<T, HttpError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.get(url).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| HttpError::ParseError(e.to_string()))
    }

    /// Make a POST request with a JSON body and deserialize the JSON response.
    pub async fn post_json<T, R>(&self, url: &str, body: &T) -> Result<R, HttpError>
    where
        T: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        debug!("POST request to {}", url);
        let response = self
            .client
            .post(url)
            .timeout(self.default_timeout)
            .json(body)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        response
            .json::<R>()
            .await
            .map_err(|e| HttpError::ParseError(e.to_string()))
    }

    /// Make a PATCH request with a JSON body.
    pub async fn patch_json<T>(&self, url: &str, body: &T) -> Result<Response, HttpError>
    where
        T: Serialize,
    {
        debug!("PATCH request to {}", url);
        let response = self
            .client
            .patch(url)
            .timeout(self.default_timeout)
            .json(body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, url: &str) -> Result<Response, HttpError> {
        debug!("DELETE request to {}", url);
        let response = self
            .client
            .delete(url)
            .timeout(self.default_timeout)
            .send()
            .await?;
        Self::check_status(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_json_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let body: serde_json::Value = client
            .get_json(&format!("{}/ping", server.uri()))
            .await
            .unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_get_propagates_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = client
            .get(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_timeout_maps_to_timeout_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = HttpClient::with_timeout(Duration::from_millis(50)).unwrap();
        let err = client
            .get(&format!("{}/slow", server.uri()))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }
}
