use secrecy::SecretString;
use serde::Deserialize;

/// Settings for the external AI completion provider.
///
/// Presence of the credential gates the informational `services.ai` field in
/// the health report; it is not a liveness signal.
#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
pub struct AiSettings {
    pub api_key: Option<SecretString>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout for completion calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AiSettings {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
