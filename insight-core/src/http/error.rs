//! HTTP error types that preserve status code information throughout the
//! error chain, so callers can branch on the class of failure without
//! parsing error strings.

use reqwest::StatusCode;

/// Upstream HTTP client error.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// HTTP error response with status code and message
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Network-level error (connection, DNS, etc.)
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Failed to parse response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        // Preserve the status code when the error carries one.
        if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }
}

impl HttpError {
    /// Create an HTTP error from status code and message
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create an HTTP error from a StatusCode and message
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Http {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code if this is an HTTP error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code()
            .map(|s| (400..500).contains(&s))
            .unwrap_or(false)
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code()
            .map(|s| (500..600).contains(&s))
            .unwrap_or(false)
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout) || matches!(self, Self::Network(e) if e.is_timeout())
    }
}
