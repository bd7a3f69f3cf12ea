//! # Axum Helpers
//!
//! Shared web plumbing for the estate services.
//!
//! - **[`errors`]**: `AppError`, stable `ErrorCode` kinds and the JSON error body
//! - **[`extractors`]**: validated JSON/query and UUID path extractors
//! - **[`auth`]**: stateless JWT verification and the admin gate
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`audit`]**: audit events for admin mutations

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{ADMIN_ROLE, JwtAuth, JwtClaims, JwtConfig, jwt_auth_middleware, require_admin};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{CorsConfig, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson, ValidatedQuery};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
