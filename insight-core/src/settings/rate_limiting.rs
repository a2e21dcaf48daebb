use serde::Deserialize;
use std::time::Duration;

/// Rate limiting configuration validation error
#[derive(Debug)]
pub struct RateLimitingValidationError {
    pub message: String,
}

impl std::fmt::Display for RateLimitingValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rate limiting configuration error: {}", self.message)
    }
}

impl std::error::Error for RateLimitingValidationError {}

/// Rate limiting configuration for the API.
///
/// Three tiers guard the API surface, all keyed by client address:
/// - `api` — coarse ceiling over everything under `/api`
/// - `query` — segment/email/early-warning read endpoints
/// - `ai` — AI completion endpoints, the most expensive upstream call
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitingConfig {
    /// Global enable/disable switch for all rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "TierConfig::default_api")]
    pub api: TierConfig,

    #[serde(default = "TierConfig::default_query")]
    pub query: TierConfig,

    #[serde(default = "TierConfig::default_ai")]
    pub ai: TierConfig,
}

fn default_enabled() -> bool {
    true
}

impl Default for RateLimitingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api: TierConfig::default_api(),
            query: TierConfig::default_query(),
            ai: TierConfig::default_ai(),
        }
    }
}

impl RateLimitingConfig {
    /// Validate the rate limiting configuration
    pub fn validate(&self) -> Result<(), RateLimitingValidationError> {
        if !self.enabled {
            return Ok(()); // Skip validation if rate limiting is disabled
        }

        self.api.validate().map_err(|e| RateLimitingValidationError {
            message: format!("api: {}", e.message),
        })?;

        self.query
            .validate()
            .map_err(|e| RateLimitingValidationError {
                message: format!("query: {}", e.message),
            })?;

        self.ai.validate().map_err(|e| RateLimitingValidationError {
            message: format!("ai: {}", e.message),
        })?;

        Ok(())
    }
}

/// Configuration for a single rate limiting tier: a fixed window and the
/// maximum number of requests per client key inside that window.
#[derive(Debug, Clone, Deserialize)]
pub struct TierConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl TierConfig {
    pub fn default_api() -> Self {
        Self {
            max_requests: 100,
            window_secs: 60,
        }
    }

    pub fn default_query() -> Self {
        Self {
            max_requests: 60,
            window_secs: 60,
        }
    }

    pub fn default_ai() -> Self {
        Self {
            max_requests: 10,
            window_secs: 60,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Validate the tier configuration
    pub fn validate(&self) -> Result<(), RateLimitingValidationError> {
        if self.max_requests == 0 {
            return Err(RateLimitingValidationError {
                message: "max_requests must be greater than 0".to_string(),
            });
        }

        if self.window_secs == 0 {
            return Err(RateLimitingValidationError {
                message: "window_secs must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_config_valid() {
        let config = TierConfig {
            max_requests: 60,
            window_secs: 60,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tier_config_zero_requests_invalid() {
        let config = TierConfig {
            max_requests: 0,
            window_secs: 60,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tier_config_zero_window_invalid() {
        let config = TierConfig {
            max_requests: 10,
            window_secs: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rate_limiting_config_disabled_skips_validation() {
        let config = RateLimitingConfig {
            enabled: false,
            api: TierConfig {
                max_requests: 0,
                window_secs: 0, // Invalid, but should be skipped
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rate_limiting_config_validates_all_tiers() {
        let config = RateLimitingConfig {
            enabled: true,
            api: TierConfig {
                max_requests: 100,
                window_secs: 60,
            },
            query: TierConfig {
                max_requests: 0,
                window_secs: 60,
            },
            ai: TierConfig::default_ai(),
        };
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("query"));
    }

    #[test]
    fn test_defaults_order_tiers_from_broad_to_narrow() {
        let config = RateLimitingConfig::default();
        assert!(config.api.max_requests > config.query.max_requests);
        assert!(config.query.max_requests > config.ai.max_requests);
    }
}
