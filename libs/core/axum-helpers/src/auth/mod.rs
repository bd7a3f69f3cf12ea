//! Stateless JWT authentication.
//!
//! The auth middleware verifies the bearer token and stores the decoded
//! [`JwtClaims`] in the request extensions; handlers read them back with
//! `Extension<JwtClaims>`. Nothing about the caller is kept in process-wide
//! state.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware, require_admin};
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let admin = Router::new()
//!     .route("/admin/societies", post(create_society))
//!     .layer(axum::middleware::from_fn(require_admin))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{ADMIN_ROLE, JwtAuth, JwtClaims};
pub use middleware::{jwt_auth_middleware, require_admin};
