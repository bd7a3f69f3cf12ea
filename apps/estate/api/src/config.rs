use axum_helpers::{CorsConfig, JwtConfig};
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_cost_estimation::EstimatorPolicy;
use domain_societies::{PlacesConfig, SearchConfig};
use domain_valuation::ValuationConfig;

pub use core_config::Environment;

/// Application configuration, composed from each library's `FromEnv` section
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub estimator: EstimatorPolicy,
    pub places: PlacesConfig,
    pub search: SearchConfig,
    pub valuation: ValuationConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?, // HOST=0.0.0.0, PORT=4000
            database: PostgresConfig::from_env()?, // DATABASE_URL required
            jwt: JwtConfig::from_env()?,
            cors: CorsConfig::from_env()?,
            estimator: EstimatorPolicy::from_env()?,
            places: PlacesConfig::from_env()?, // PLACES_API_KEY required
            search: SearchConfig::from_env()?,
            valuation: ValuationConfig::from_env()?,
        })
    }
}
