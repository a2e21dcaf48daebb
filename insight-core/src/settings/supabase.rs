use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Connection settings for the managed table store (Supabase REST API).
#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
pub struct SupabaseSettings {
    /// Base URL of the Supabase project, e.g. `https://xyz.supabase.co`.
    /// When unset the service still starts, but every upstream call and
    /// the health probe report the dependency as unavailable.
    pub url: Option<String>,

    /// Service key sent as `apikey` and bearer token.
    pub api_key: Option<SecretString>,

    /// Table used for the one-row liveness probe.
    #[serde(default = "default_probe_table")]
    pub probe_table: String,

    /// Column selected by the liveness probe.
    #[serde(default = "default_probe_column")]
    pub probe_column: String,

    /// Upper bound for the liveness probe, in seconds.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

fn default_probe_table() -> String {
    "segments".to_string()
}

fn default_probe_column() -> String {
    "segment_id".to_string()
}

fn default_probe_timeout_secs() -> u64 {
    5
}

impl Default for SupabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            probe_table: default_probe_table(),
            probe_column: default_probe_column(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl SupabaseSettings {
    pub fn is_configured(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
