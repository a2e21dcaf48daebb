use serde::Deserialize;

/// Settings for the public HTTP surface.
#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
#[readonly::make]
pub struct ApiServer {
    pub bind_address: String,

    /// Origins allowed to make cross-site requests against the API.
    /// Requests without an `Origin` header (curl, server-to-server) are
    /// always admitted.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

impl Default for ApiServer {
    fn default() -> Self {
        ApiServer {
            bind_address: "0.0.0.0:4000".to_string(),
            allowed_origins: default_allowed_origins(),
        }
    }
}
