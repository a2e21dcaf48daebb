use config::{Config, ConfigError, Environment, File};
use insight_core::settings::{
    ai::AiSettings, api_server::ApiServer, rate_limiting::RateLimitingConfig,
    supabase::SupabaseSettings,
};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
pub struct Settings {
    #[serde(default)]
    pub debug: bool,

    /// Reported in `/health`, defaults to the run mode.
    pub environment: String,

    #[serde(default)]
    pub api: ApiServer,

    #[serde(default)]
    pub supabase: SupabaseSettings,

    #[serde(default)]
    pub ai: AiSettings,

    #[serde(default)]
    pub rate_limiting: RateLimitingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            debug: false,
            environment: "development".to_string(),
            api: ApiServer::default(),
            supabase: SupabaseSettings::default(),
            ai: AiSettings::default(),
            rate_limiting: RateLimitingConfig::default(),
        }
    }
}

impl Settings {
    pub fn get_environment() -> Environment {
        Environment::default()
            .prefix("INSIGHT")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("api.allowed_origins")
    }

    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("INSIGHT_RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("debug", false)?
            .set_default("environment", run_mode.clone())?
            .set_default("api.bind_address", "0.0.0.0:4000")?
            // Start off by merging in the "default" configuration file
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Self::get_environment());

        let s = builder.build()?;
        let settings: Settings = s.try_deserialize()?;

        settings
            .rate_limiting
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        settings
            .api
            .bind_address
            .parse::<std::net::SocketAddr>()
            .map_err(|e| ConfigError::Message(format!("Invalid api.bind_address: {e}")))?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        let settings = Settings::default();
        assert!(settings.rate_limiting.validate().is_ok());
        assert_eq!(settings.environment, "development");
        assert!(!settings.supabase.is_configured());
        assert!(!settings.ai.is_configured());
    }

    #[test]
    fn test_environment_override_parses_origin_list() {
        let config = Config::builder()
            .set_default("environment", "test")
            .unwrap()
            .set_override("api.bind_address", "127.0.0.1:0")
            .unwrap()
            .set_override(
                "api.allowed_origins",
                vec!["http://a.test".to_string(), "http://b.test".to_string()],
            )
            .unwrap()
            .build()
            .unwrap();

        let settings: Settings = config.try_deserialize().unwrap();
        assert_eq!(
            settings.api.allowed_origins,
            vec!["http://a.test", "http://b.test"]
        );
    }
}
