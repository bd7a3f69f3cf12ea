use axum::{middleware, routing::get};
use axum_helpers::JwtAuth;
use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_societies::GooglePlacesClient;
use domain_valuation::HttpValuationClient;
use migration::Migrator;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation so startup errors are colored too
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    observability::init_metrics().map_err(|e| eyre::eyre!("Metrics init failed: {}", e))?;

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
    database::postgres::run_migrations::<Migrator>(&db, config.app.name)
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    let places = GooglePlacesClient::new(&config.places)
        .map_err(|e| eyre::eyre!("Places client init failed: {}", e))?;
    let valuation = HttpValuationClient::new(&config.valuation)
        .map_err(|e| eyre::eyre!("Valuation client init failed: {}", e))?;

    info!(
        categories = config.places.catalog.len(),
        max_concurrency = config.places.max_concurrency,
        "Amenity search configured"
    );

    let state = AppState {
        jwt_auth: JwtAuth::new(&config.jwt),
        config,
        db,
        places: Arc::new(places),
        valuation,
    };

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(
        api_routes,
        &state.config.cors,
        state.config.server.request_timeout,
    );

    // - /health: liveness with app name/version
    // - /ready: Postgres check
    // - /metrics: Prometheus scrape
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()))
        .route("/metrics", get(observability::metrics_handler))
        .layer(middleware::from_fn(observability::metrics_middleware));

    info!("Starting estate API");

    let server = state.config.server.clone();
    let db = state.db.clone();

    create_production_app(app, &server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connections");
        match db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Estate API shutdown complete");
    Ok(())
}
