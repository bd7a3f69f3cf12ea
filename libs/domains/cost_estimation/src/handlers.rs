use axum::{
    Extension, Json, Router,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, JwtClaims, UuidPath, ValidatedJson,
    errors::responses::{
        ForbiddenResponse, InvalidInputResponse, MissingTierRateResponse, NotFoundResponse,
        StoreUnavailableResponse, UnauthorizedResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CostResult;
use crate::models::{
    AreaUnit, CostBreakdown, ElectricalCost, EstimateRequest, QualityMaterial,
    QualityMaterialQuantity, ReferenceData, StandardMaterial, Tier, UpdateQuantity, UpdateRate,
    UpdateStandardMaterial,
};
use crate::repository::ReferenceDataRepository;
use crate::service::CostEstimationService;

const TAG: &str = "cost-estimation";
const ADMIN_TAG: &str = "reference-data-admin";

type SharedService<R> = Arc<CostEstimationService<R>>;

/// OpenAPI documentation for the public estimator routes
#[derive(OpenApi)]
#[openapi(
    paths(estimate_cost, reference_data),
    components(
        schemas(EstimateRequest, CostBreakdown, ReferenceData, Tier, AreaUnit),
        responses(InvalidInputResponse, MissingTierRateResponse, StoreUnavailableResponse)
    ),
    tags((name = TAG, description = "Construction cost estimates"))
)]
pub struct ApiDoc;

/// OpenAPI documentation for reference data administration
#[derive(OpenApi)]
#[openapi(
    paths(
        list_standard_materials,
        get_standard_material,
        update_standard_material,
        list_quality_materials,
        get_quality_material,
        update_quality_material,
        list_quality_material_quantities,
        get_quality_material_quantity,
        update_quality_material_quantity,
        list_electrical_costs,
        get_electrical_cost,
        update_electrical_cost,
    ),
    components(
        schemas(
            StandardMaterial,
            QualityMaterial,
            QualityMaterialQuantity,
            ElectricalCost,
            UpdateStandardMaterial,
            UpdateRate,
            UpdateQuantity
        ),
        responses(
            InvalidInputResponse,
            NotFoundResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            StoreUnavailableResponse
        )
    ),
    tags((name = ADMIN_TAG, description = "Material and electrical rate maintenance"))
)]
pub struct AdminApiDoc;

/// Public routes: `/estimate-cost` and `/reference-data`
pub fn router<R: ReferenceDataRepository + 'static>(service: CostEstimationService<R>) -> Router {
    Router::new()
        .route("/estimate-cost", post(estimate_cost))
        .route("/reference-data", get(reference_data))
        .with_state(Arc::new(service))
}

/// Admin routes. Callers must layer authentication on top; handlers read
/// [`JwtClaims`] from the request extensions for the audit trail.
pub fn admin_router<R: ReferenceDataRepository + 'static>(
    service: CostEstimationService<R>,
) -> Router {
    Router::new()
        .route("/standard-materials", get(list_standard_materials))
        .route(
            "/standard-materials/{id}",
            get(get_standard_material).put(update_standard_material),
        )
        .route("/quality-materials", get(list_quality_materials))
        .route(
            "/quality-materials/{id}",
            get(get_quality_material).put(update_quality_material),
        )
        .route(
            "/quality-material-quantities",
            get(list_quality_material_quantities),
        )
        .route(
            "/quality-material-quantities/{id}",
            get(get_quality_material_quantity).put(update_quality_material_quantity),
        )
        .route("/electrical-costs", get(list_electrical_costs))
        .route(
            "/electrical-costs/{id}",
            get(get_electrical_cost).put(update_electrical_cost),
        )
        .with_state(Arc::new(service))
}

/// Estimate construction cost for a plot
#[utoipa::path(
    post,
    path = "/estimate-cost",
    tag = TAG,
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Cost breakdown", body = CostBreakdown),
        (status = 400, response = InvalidInputResponse),
        (status = 422, response = MissingTierRateResponse),
        (status = 503, response = StoreUnavailableResponse)
    )
)]
async fn estimate_cost<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
    ValidatedJson(request): ValidatedJson<EstimateRequest>,
) -> CostResult<Json<CostBreakdown>> {
    let breakdown = service.estimate(request).await?;
    Ok(Json(breakdown))
}

/// All four reference tables in one snapshot
#[utoipa::path(
    get,
    path = "/reference-data",
    tag = TAG,
    responses(
        (status = 200, description = "Reference tables", body = ReferenceData),
        (status = 503, response = StoreUnavailableResponse)
    )
)]
async fn reference_data<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
) -> CostResult<Json<ReferenceData>> {
    Ok(Json(service.reference_data().await?))
}

fn audit_update(
    claims: &JwtClaims,
    headers: &HeaderMap,
    action: &str,
    resource: String,
    details: serde_json::Value,
) {
    AuditEvent::by(claims, headers, action, resource, AuditOutcome::Success)
        .with_details(details)
        .log();
}

/// List standard materials
#[utoipa::path(
    get,
    path = "/standard-materials",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Standard materials", body = Vec<StandardMaterial>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse)
    )
)]
async fn list_standard_materials<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
) -> CostResult<Json<Vec<StandardMaterial>>> {
    Ok(Json(service.list_standard_materials().await?))
}

/// Get a standard material
#[utoipa::path(
    get,
    path = "/standard-materials/{id}",
    tag = ADMIN_TAG,
    params(("id" = uuid::Uuid, Path, description = "Standard material id")),
    responses(
        (status = 200, description = "Standard material", body = StandardMaterial),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_standard_material<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
    UuidPath(id): UuidPath,
) -> CostResult<Json<StandardMaterial>> {
    Ok(Json(service.get_standard_material(id).await?))
}

/// Update a standard material's rate and/or quantity
#[utoipa::path(
    put,
    path = "/standard-materials/{id}",
    tag = ADMIN_TAG,
    params(("id" = uuid::Uuid, Path, description = "Standard material id")),
    request_body = UpdateStandardMaterial,
    responses(
        (status = 200, description = "Updated standard material", body = StandardMaterial),
        (status = 400, response = InvalidInputResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_standard_material<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateStandardMaterial>,
) -> CostResult<Json<StandardMaterial>> {
    let updated = service.update_standard_material(id, input).await?;
    audit_update(
        &claims,
        &headers,
        "standard_material.update",
        format!("standard_material:{id}"),
        json!({ "material": updated.material, "rate": updated.rate, "quantity": updated.quantity }),
    );
    Ok(Json(updated))
}

/// List quality material rates
#[utoipa::path(
    get,
    path = "/quality-materials",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Quality material rates", body = Vec<QualityMaterial>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse)
    )
)]
async fn list_quality_materials<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
) -> CostResult<Json<Vec<QualityMaterial>>> {
    Ok(Json(service.list_quality_materials().await?))
}

/// Get a quality material rate
#[utoipa::path(
    get,
    path = "/quality-materials/{id}",
    tag = ADMIN_TAG,
    params(("id" = uuid::Uuid, Path, description = "Quality material id")),
    responses(
        (status = 200, description = "Quality material rate", body = QualityMaterial),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_quality_material<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
    UuidPath(id): UuidPath,
) -> CostResult<Json<QualityMaterial>> {
    Ok(Json(service.get_quality_material(id).await?))
}

/// Update a quality material rate
#[utoipa::path(
    put,
    path = "/quality-materials/{id}",
    tag = ADMIN_TAG,
    params(("id" = uuid::Uuid, Path, description = "Quality material id")),
    request_body = UpdateRate,
    responses(
        (status = 200, description = "Updated rate", body = QualityMaterial),
        (status = 400, response = InvalidInputResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_quality_material<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateRate>,
) -> CostResult<Json<QualityMaterial>> {
    let updated = service.update_quality_material(id, input).await?;
    audit_update(
        &claims,
        &headers,
        "quality_material.update",
        format!("quality_material:{id}"),
        json!({ "material": updated.material, "quality": updated.quality, "rate": updated.rate }),
    );
    Ok(Json(updated))
}

/// List quality material quantities
#[utoipa::path(
    get,
    path = "/quality-material-quantities",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Quantities per area", body = Vec<QualityMaterialQuantity>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse)
    )
)]
async fn list_quality_material_quantities<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
) -> CostResult<Json<Vec<QualityMaterialQuantity>>> {
    Ok(Json(service.list_quality_material_quantities().await?))
}

/// Get a quality material quantity
#[utoipa::path(
    get,
    path = "/quality-material-quantities/{id}",
    tag = ADMIN_TAG,
    params(("id" = uuid::Uuid, Path, description = "Quantity row id")),
    responses(
        (status = 200, description = "Quantity per area", body = QualityMaterialQuantity),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_quality_material_quantity<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
    UuidPath(id): UuidPath,
) -> CostResult<Json<QualityMaterialQuantity>> {
    Ok(Json(service.get_quality_material_quantity(id).await?))
}

/// Update a quality material quantity
#[utoipa::path(
    put,
    path = "/quality-material-quantities/{id}",
    tag = ADMIN_TAG,
    params(("id" = uuid::Uuid, Path, description = "Quantity row id")),
    request_body = UpdateQuantity,
    responses(
        (status = 200, description = "Updated quantity", body = QualityMaterialQuantity),
        (status = 400, response = InvalidInputResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_quality_material_quantity<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateQuantity>,
) -> CostResult<Json<QualityMaterialQuantity>> {
    let updated = service.update_quality_material_quantity(id, input).await?;
    audit_update(
        &claims,
        &headers,
        "quality_material_quantity.update",
        format!("quality_material_quantity:{id}"),
        json!({ "material": updated.material, "quantity": updated.quantity }),
    );
    Ok(Json(updated))
}

/// List electrical item rates
#[utoipa::path(
    get,
    path = "/electrical-costs",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Electrical rates", body = Vec<ElectricalCost>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse)
    )
)]
async fn list_electrical_costs<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
) -> CostResult<Json<Vec<ElectricalCost>>> {
    Ok(Json(service.list_electrical_costs().await?))
}

/// Get an electrical item rate
#[utoipa::path(
    get,
    path = "/electrical-costs/{id}",
    tag = ADMIN_TAG,
    params(("id" = uuid::Uuid, Path, description = "Electrical cost id")),
    responses(
        (status = 200, description = "Electrical rate", body = ElectricalCost),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_electrical_cost<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
    UuidPath(id): UuidPath,
) -> CostResult<Json<ElectricalCost>> {
    Ok(Json(service.get_electrical_cost(id).await?))
}

/// Update an electrical item rate
#[utoipa::path(
    put,
    path = "/electrical-costs/{id}",
    tag = ADMIN_TAG,
    params(("id" = uuid::Uuid, Path, description = "Electrical cost id")),
    request_body = UpdateRate,
    responses(
        (status = 200, description = "Updated rate", body = ElectricalCost),
        (status = 400, response = InvalidInputResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_electrical_cost<R: ReferenceDataRepository>(
    State(service): State<SharedService<R>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateRate>,
) -> CostResult<Json<ElectricalCost>> {
    let updated = service.update_electrical_cost(id, input).await?;
    audit_update(
        &claims,
        &headers,
        "electrical_cost.update",
        format!("electrical_cost:{id}"),
        json!({ "item": updated.item, "quality": updated.quality, "rate": updated.rate }),
    );
    Ok(Json(updated))
}
