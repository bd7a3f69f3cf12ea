//! Stable, machine-readable error kinds.
//!
//! `as_str()` is what clients switch on (the `error` field of every error
//! body); `code()` is the integer that goes into logs and metrics.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::MissingTierRate;
//! assert_eq!(code.as_str(), "MISSING_TIER_RATE");
//! assert_eq!(code.code(), 1010);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Malformed or missing request fields
    InvalidInput,

    /// Unknown society, material or route
    NotFound,

    /// Authentication credentials are missing or invalid
    Unauthorized,

    /// Authenticated caller lacks the required role
    Forbidden,

    /// Request conflicts with an existing resource
    Conflict,

    /// Reference data has no rate for the requested quality tier
    MissingTierRate,

    // Server errors (2000-2999)
    /// An unexpected internal server error occurred
    InternalError,

    /// A backend service (places provider, price model) failed
    UpstreamUnavailable,

    /// The relational store could not be reached or errored
    StoreUnavailable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::MissingTierRate => "MISSING_TIER_RATE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
        }
    }

    /// Integer code for logging and monitoring.
    ///
    /// - 1000-1999: caller errors
    /// - 2000-2999: server and dependency errors
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidInput => 1001,
            Self::NotFound => 1004,
            Self::Unauthorized => 1006,
            Self::Forbidden => 1007,
            Self::Conflict => 1008,
            Self::MissingTierRate => 1010,
            Self::InternalError => 2001,
            Self::UpstreamUnavailable => 2002,
            Self::StoreUnavailable => 2003,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Request validation failed",
            Self::NotFound => "Resource not found",
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Access forbidden",
            Self::Conflict => "Resource already exists",
            Self::MissingTierRate => "No rate configured for the requested quality tier",
            Self::InternalError => "An internal server error occurred",
            Self::UpstreamUnavailable => "An upstream service is unavailable",
            Self::StoreUnavailable => "The data store is temporarily unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
