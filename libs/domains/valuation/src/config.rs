use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ValuationConfig {
    pub predictor_url: String,
    pub recommender_url: String,
    pub timeout: Duration,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            predictor_url: "http://localhost:5001".to_string(),
            recommender_url: "http://localhost:5002".to_string(),
            timeout: Duration::from_millis(10_000),
        }
    }
}

/// Environment variables:
/// - `PREDICTOR_URL` (default: http://localhost:5001)
/// - `RECOMMENDER_URL` (default: http://localhost:5002)
/// - `VALUATION_TIMEOUT_MS` (default: 10000)
impl FromEnv for ValuationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            predictor_url: env_or_default("PREDICTOR_URL", &defaults.predictor_url),
            recommender_url: env_or_default("RECOMMENDER_URL", &defaults.recommender_url),
            timeout: Duration::from_millis(env_parse("VALUATION_TIMEOUT_MS", 10_000)?),
        })
    }
}
