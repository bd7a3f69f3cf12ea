use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, FromEnv, env_or_default};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Allowed browser origins, from the comma-separated `CORS_ALLOWED_ORIGIN`.
///
/// Defaults to the local Vite dev server.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<HeaderValue>,
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("CORS_ALLOWED_ORIGIN", "http://localhost:5173");

        let allowed_origins = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(HeaderValue::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: e.to_string(),
            })?;

        if allowed_origins.is_empty() {
            return Err(ConfigError::Invalid {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "at least one origin is required".to_string(),
            });
        }

        Ok(Self { allowed_origins })
    }
}

/// CORS layer for the browser client: JSON + bearer auth, credentials allowed.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::COOKIE,
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_config_defaults_to_dev_server() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            let config = CorsConfig::from_env().unwrap();
            assert_eq!(config.allowed_origins.len(), 1);
            assert_eq!(config.allowed_origins[0], "http://localhost:5173");
        });
    }

    #[test]
    fn test_cors_config_splits_and_trims() {
        temp_env::with_var(
            "CORS_ALLOWED_ORIGIN",
            Some("https://estate.example.com, http://localhost:3000,"),
            || {
                let config = CorsConfig::from_env().unwrap();
                assert_eq!(config.allowed_origins.len(), 2);
                assert_eq!(config.allowed_origins[1], "http://localhost:3000");
            },
        );
    }

    #[test]
    fn test_cors_config_rejects_only_separators() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some(" , "), || {
            assert!(CorsConfig::from_env().is_err());
        });
    }
}
