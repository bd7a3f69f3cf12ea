use core_config::{ConfigError, FromEnv, env_or_default, env_parse, env_required};
use std::time::Duration;

use crate::amenities::{AmenityCatalog, DEFAULT_CATALOG};

pub const DEFAULT_PLACES_URL: &str =
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// Places provider connection and fan-out settings
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub api_key: String,
    pub base_url: String,
    /// Radius around a society searched for each category
    pub search_radius_m: u32,
    /// Per provider call; an expired call counts as a failed branch
    pub timeout: Duration,
    /// Concurrent category branches per society
    pub max_concurrency: usize,
    pub catalog: AmenityCatalog,
}

impl PlacesConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        let catalog = AmenityCatalog::default();
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_PLACES_URL.to_string(),
            search_radius_m: 1000,
            timeout: Duration::from_millis(5000),
            max_concurrency: catalog.len(),
            catalog,
        }
    }
}

/// Environment variables:
/// - `PLACES_API_KEY` (required)
/// - `PLACES_BASE_URL` (default: Google nearby search)
/// - `PLACES_SEARCH_RADIUS_M` (default: 1000)
/// - `PLACES_TIMEOUT_MS` (default: 5000)
/// - `PLACES_MAX_CONCURRENCY` (default: number of categories)
/// - `AMENITY_CATEGORIES` (default: the ten built-in categories)
impl FromEnv for PlacesConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let catalog = AmenityCatalog::parse(&env_or_default("AMENITY_CATEGORIES", DEFAULT_CATALOG))?;
        let max_concurrency = env_parse("PLACES_MAX_CONCURRENCY", catalog.len())?;
        if max_concurrency == 0 {
            return Err(ConfigError::Invalid {
                key: "PLACES_MAX_CONCURRENCY".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            api_key: env_required("PLACES_API_KEY")?,
            base_url: env_or_default("PLACES_BASE_URL", DEFAULT_PLACES_URL),
            search_radius_m: env_parse("PLACES_SEARCH_RADIUS_M", 1000)?,
            timeout: Duration::from_millis(env_parse("PLACES_TIMEOUT_MS", 5000)?),
            max_concurrency,
            catalog,
        })
    }
}

/// Result sizes and preference-search defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub name_search_limit: usize,
    pub default_radius_km: f64,
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            name_search_limit: 10,
            default_radius_km: 10.0,
            default_limit: 6,
        }
    }
}

/// Environment variables:
/// - `SOCIETY_NAME_SEARCH_LIMIT` (default: 10)
/// - `PREFERENCE_DEFAULT_RADIUS_KM` (default: 10)
/// - `PREFERENCE_DEFAULT_LIMIT` (default: 6)
impl FromEnv for SearchConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            name_search_limit: env_parse("SOCIETY_NAME_SEARCH_LIMIT", defaults.name_search_limit)?,
            default_radius_km: env_parse(
                "PREFERENCE_DEFAULT_RADIUS_KM",
                defaults.default_radius_km,
            )?,
            default_limit: env_parse("PREFERENCE_DEFAULT_LIMIT", defaults.default_limit)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_places_config_requires_api_key() {
        temp_env::with_var_unset("PLACES_API_KEY", || {
            assert!(matches!(
                PlacesConfig::from_env(),
                Err(ConfigError::MissingEnvVar(_))
            ));
        });
    }

    #[test]
    fn test_places_config_defaults() {
        temp_env::with_vars(
            [
                ("PLACES_API_KEY", Some("key")),
                ("PLACES_BASE_URL", None),
                ("PLACES_SEARCH_RADIUS_M", None),
                ("PLACES_TIMEOUT_MS", None),
                ("PLACES_MAX_CONCURRENCY", None),
                ("AMENITY_CATEGORIES", None),
            ],
            || {
                let config = PlacesConfig::from_env().unwrap();
                assert_eq!(config.base_url, DEFAULT_PLACES_URL);
                assert_eq!(config.search_radius_m, 1000);
                assert_eq!(config.timeout, Duration::from_secs(5));
                assert_eq!(config.max_concurrency, 10);
                assert_eq!(config.catalog, AmenityCatalog::default());
            },
        );
    }

    #[test]
    fn test_custom_catalog_drives_concurrency_default() {
        temp_env::with_vars(
            [
                ("PLACES_API_KEY", Some("key")),
                ("AMENITY_CATEGORIES", Some("Parks=park;Gyms=gym")),
                ("PLACES_MAX_CONCURRENCY", None),
            ],
            || {
                let config = PlacesConfig::from_env().unwrap();
                assert_eq!(config.catalog.len(), 2);
                assert_eq!(config.max_concurrency, 2);
            },
        );
    }

    #[test]
    fn test_zero_concurrency_is_invalid() {
        temp_env::with_vars(
            [
                ("PLACES_API_KEY", Some("key")),
                ("PLACES_MAX_CONCURRENCY", Some("0")),
            ],
            || {
                assert!(matches!(
                    PlacesConfig::from_env(),
                    Err(ConfigError::Invalid { .. })
                ));
            },
        );
    }

    #[test]
    fn test_search_config_defaults() {
        temp_env::with_vars_unset(
            [
                "SOCIETY_NAME_SEARCH_LIMIT",
                "PREFERENCE_DEFAULT_RADIUS_KM",
                "PREFERENCE_DEFAULT_LIMIT",
            ],
            || {
                assert_eq!(SearchConfig::from_env().unwrap(), SearchConfig::default());
            },
        );
    }
}
