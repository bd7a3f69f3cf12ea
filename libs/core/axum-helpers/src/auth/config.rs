use core_config::{ConfigError, FromEnv, env_parse, env_required};

/// JWT authentication configuration.
///
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_TOKEN_TTL_SECS` (default: 3600)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub token_ttl_secs: i64,
}

impl JwtConfig {
    /// # Panics
    /// Panics if the secret is shorter than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            token_ttl_secs: 3600,
        }
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        Ok(Self {
            secret,
            token_ttl_secs: env_parse("JWT_TOKEN_TTL_SECS", 3600)?,
        })
    }
}
