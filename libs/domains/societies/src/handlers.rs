use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, JwtClaims, UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        ConflictResponse, ForbiddenResponse, InvalidInputResponse, NotFoundResponse,
        StoreUnavailableResponse, UnauthorizedResponse,
    },
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::SocietyResult;
use crate::geo::GeoPoint;
use crate::models::{
    AmenityAnnotation, AmenityResult, CreateSociety, NameSearchQuery, PreferenceQuery, Society,
    SocietyWithAmenities, UpdateSociety,
};
use crate::places::PlacesProvider;
use crate::repository::SocietyRepository;
use crate::service::SocietyService;

const TAG: &str = "societies";
const ADMIN_TAG: &str = "society-admin";

type SharedService<R, P> = Arc<SocietyService<R, P>>;

/// OpenAPI documentation for society search
#[derive(OpenApi)]
#[openapi(
    paths(search_by_name, search_by_preferences, society_amenities),
    components(
        schemas(
            SocietyWithAmenities,
            Society,
            AmenityAnnotation,
            AmenityResult,
            GeoPoint
        ),
        responses(InvalidInputResponse, NotFoundResponse, StoreUnavailableResponse)
    ),
    tags((name = TAG, description = "Society search with nearby amenities"))
)]
pub struct ApiDoc;

/// OpenAPI documentation for society administration
#[derive(OpenApi)]
#[openapi(
    paths(list_societies, create_society, get_society, update_society, delete_society),
    components(
        schemas(Society, CreateSociety, UpdateSociety),
        responses(
            InvalidInputResponse,
            NotFoundResponse,
            ConflictResponse,
            UnauthorizedResponse,
            ForbiddenResponse
        )
    ),
    tags((name = ADMIN_TAG, description = "Society maintenance"))
)]
pub struct AdminApiDoc;

/// Public search routes under `/societies`
pub fn router<R, P>(service: SocietyService<R, P>) -> Router
where
    R: SocietyRepository + 'static,
    P: PlacesProvider + 'static,
{
    Router::new()
        .route("/societies", get(search_by_name))
        .route("/societies/preferences", get(search_by_preferences))
        .route("/societies/{id}/amenities", get(society_amenities))
        .with_state(Arc::new(service))
}

/// Admin routes. Callers must layer authentication on top.
pub fn admin_router<R, P>(service: SocietyService<R, P>) -> Router
where
    R: SocietyRepository + 'static,
    P: PlacesProvider + 'static,
{
    Router::new()
        .route("/societies", get(list_societies).post(create_society))
        .route(
            "/societies/{id}",
            get(get_society).put(update_society).delete(delete_society),
        )
        .with_state(Arc::new(service))
}

/// Search societies in a city by name prefix
#[utoipa::path(
    get,
    path = "/societies",
    tag = TAG,
    params(NameSearchQuery),
    responses(
        (status = 200, description = "Matching societies with amenities", body = Vec<SocietyWithAmenities>),
        (status = 400, response = InvalidInputResponse),
        (status = 503, response = StoreUnavailableResponse)
    )
)]
async fn search_by_name<R: SocietyRepository, P: PlacesProvider>(
    State(service): State<SharedService<R, P>>,
    ValidatedQuery(query): ValidatedQuery<NameSearchQuery>,
) -> SocietyResult<Json<Vec<SocietyWithAmenities>>> {
    Ok(Json(service.search_by_name(query).await?))
}

/// Nearest societies that have every requested amenity category
#[utoipa::path(
    get,
    path = "/societies/preferences",
    tag = TAG,
    params(PreferenceQuery),
    responses(
        (status = 200, description = "Qualifying societies, nearest first", body = Vec<SocietyWithAmenities>),
        (status = 400, response = InvalidInputResponse),
        (status = 503, response = StoreUnavailableResponse)
    )
)]
async fn search_by_preferences<R: SocietyRepository, P: PlacesProvider>(
    State(service): State<SharedService<R, P>>,
    ValidatedQuery(query): ValidatedQuery<PreferenceQuery>,
) -> SocietyResult<Json<Vec<SocietyWithAmenities>>> {
    Ok(Json(service.search_by_preferences(query).await?))
}

/// One society with its full amenities annotation
#[utoipa::path(
    get,
    path = "/societies/{id}/amenities",
    tag = TAG,
    params(("id" = uuid::Uuid, Path, description = "Society id")),
    responses(
        (status = 200, description = "Society with amenities", body = SocietyWithAmenities),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn society_amenities<R: SocietyRepository, P: PlacesProvider>(
    State(service): State<SharedService<R, P>>,
    UuidPath(id): UuidPath,
) -> SocietyResult<Json<SocietyWithAmenities>> {
    Ok(Json(service.amenities_for(id).await?))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SocietyListQuery {
    /// Restrict to one city
    pub city: Option<String>,
}

/// List societies
#[utoipa::path(
    get,
    path = "/societies",
    tag = ADMIN_TAG,
    params(SocietyListQuery),
    responses(
        (status = 200, description = "Societies", body = Vec<Society>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse)
    )
)]
async fn list_societies<R: SocietyRepository, P: PlacesProvider>(
    State(service): State<SharedService<R, P>>,
    Query(query): Query<SocietyListQuery>,
) -> SocietyResult<Json<Vec<Society>>> {
    let city = query.city.filter(|c| !c.trim().is_empty());
    Ok(Json(service.list_societies(city).await?))
}

/// Create a society
#[utoipa::path(
    post,
    path = "/societies",
    tag = ADMIN_TAG,
    request_body = CreateSociety,
    responses(
        (status = 201, description = "Society created", body = Society),
        (status = 400, response = InvalidInputResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn create_society<R: SocietyRepository, P: PlacesProvider>(
    State(service): State<SharedService<R, P>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateSociety>,
) -> SocietyResult<(StatusCode, Json<Society>)> {
    let society = service.create_society(input).await?;
    AuditEvent::by(
        &claims,
        &headers,
        "society.create",
        format!("society:{}", society.id),
        AuditOutcome::Success,
    )
    .with_details(json!({ "name": society.name, "city": society.city }))
    .log();
    Ok((StatusCode::CREATED, Json(society)))
}

/// Get a society
#[utoipa::path(
    get,
    path = "/societies/{id}",
    tag = ADMIN_TAG,
    params(("id" = uuid::Uuid, Path, description = "Society id")),
    responses(
        (status = 200, description = "Society", body = Society),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_society<R: SocietyRepository, P: PlacesProvider>(
    State(service): State<SharedService<R, P>>,
    UuidPath(id): UuidPath,
) -> SocietyResult<Json<Society>> {
    Ok(Json(service.get_society(id).await?))
}

/// Update a society; absent fields are kept
#[utoipa::path(
    put,
    path = "/societies/{id}",
    tag = ADMIN_TAG,
    params(("id" = uuid::Uuid, Path, description = "Society id")),
    request_body = UpdateSociety,
    responses(
        (status = 200, description = "Updated society", body = Society),
        (status = 400, response = InvalidInputResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn update_society<R: SocietyRepository, P: PlacesProvider>(
    State(service): State<SharedService<R, P>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateSociety>,
) -> SocietyResult<Json<Society>> {
    let society = service.update_society(id, input).await?;
    AuditEvent::by(
        &claims,
        &headers,
        "society.update",
        format!("society:{id}"),
        AuditOutcome::Success,
    )
    .with_details(json!({
        "name": society.name,
        "city": society.city,
        "latitude": society.latitude,
        "longitude": society.longitude
    }))
    .log();
    Ok(Json(society))
}

/// Delete a society
#[utoipa::path(
    delete,
    path = "/societies/{id}",
    tag = ADMIN_TAG,
    params(("id" = uuid::Uuid, Path, description = "Society id")),
    responses(
        (status = 204, description = "Society deleted"),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_society<R: SocietyRepository, P: PlacesProvider>(
    State(service): State<SharedService<R, P>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> SocietyResult<StatusCode> {
    service.delete_society(id).await?;
    AuditEvent::by(
        &claims,
        &headers,
        "society.delete",
        format!("society:{id}"),
        AuditOutcome::Success,
    )
    .log();
    Ok(StatusCode::NO_CONTENT)
}
