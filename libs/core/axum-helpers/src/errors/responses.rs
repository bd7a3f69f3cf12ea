//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - invalid or missing input",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "INVALID_INPUT",
        "message": "city and query are required",
    })
)]
pub struct InvalidInputResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Society not found",
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - Authentication required",
    content_type = "application/json",
    example = json!({
        "code": 1006,
        "error": "UNAUTHORIZED",
        "message": "Authentication required",
    })
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - admin role required",
    content_type = "application/json",
    example = json!({
        "code": 1007,
        "error": "FORBIDDEN",
        "message": "Admin role required",
    })
)]
pub struct ForbiddenResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "code": 1008,
        "error": "CONFLICT",
        "message": "Society with this name and city already exists.",
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Missing reference rate for a quality tier",
    content_type = "application/json",
    example = json!({
        "code": 1010,
        "error": "MISSING_TIER_RATE",
        "message": "No Low rate for 'Cement'",
        "details": { "material": "Cement", "tier": "Low" }
    })
)]
pub struct MissingTierRateResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Upstream service failed",
    content_type = "application/json",
    example = json!({
        "code": 2002,
        "error": "UPSTREAM_UNAVAILABLE",
        "message": "An upstream service is unavailable",
    })
)]
pub struct UpstreamUnavailableResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Data store unavailable",
    content_type = "application/json",
    example = json!({
        "code": 2003,
        "error": "STORE_UNAVAILABLE",
        "message": "The data store is temporarily unavailable",
    })
)]
pub struct StoreUnavailableResponse(pub ErrorResponse);
