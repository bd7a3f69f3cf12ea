//! Shared application state.
//!
//! Cloned into the domain adapters once at startup; every field is a
//! cheap handle (connection pool, HTTP clients behind `Arc`).

use axum_helpers::JwtAuth;
use domain_societies::GooglePlacesClient;
use domain_valuation::HttpValuationClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    pub jwt_auth: JwtAuth,
    pub places: Arc<GooglePlacesClient>,
    pub valuation: HttpValuationClient,
}
