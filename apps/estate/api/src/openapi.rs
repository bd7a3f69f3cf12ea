use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse)),
    info(
        title = "Estate API",
        version = "0.1.0",
        description = "Residential society search with nearby amenities, reviews and trends, construction cost estimates and price prediction"
    ),
    servers((url = "/api", description = "API base path"))
)]
struct BaseDoc;

/// Public domain docs at the root, admin docs under `/admin`
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        BaseDoc::openapi()
            .merge_from(domain_cost_estimation::handlers::ApiDoc::openapi())
            .merge_from(domain_societies::handlers::ApiDoc::openapi())
            .merge_from(domain_valuation::handlers::ApiDoc::openapi())
            .merge_from(domain_engagement::handlers::ApiDoc::openapi())
            .nest(
                "/admin",
                domain_cost_estimation::handlers::AdminApiDoc::openapi(),
            )
            .nest("/admin", domain_societies::handlers::AdminApiDoc::openapi())
    }
}
