//! Server bootstrap: router assembly, health endpoints, graceful shutdown.
//!
//! ```ignore
//! let router = create_router::<ApiDoc>(api_routes, &cors, config.server.request_timeout)
//!     .merge(health_router(app_info!()));
//! create_production_app(router, &config.server, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
