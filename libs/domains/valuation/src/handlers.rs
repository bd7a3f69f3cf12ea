use axum::{Json, Router, extract::State, routing::post};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{InvalidInputResponse, NotFoundResponse, UpstreamUnavailableResponse},
};
use domain_societies::SocietyRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::client::ValuationBackend;
use crate::error::ValuationResult;
use crate::models::{
    PlotPoint, PredictRequest, Prediction, RecommendRequest, Recommendation, Recommendations,
};
use crate::service::ValuationService;

const TAG: &str = "valuation";

type SharedService<B, R> = Arc<ValuationService<B, R>>;

#[derive(OpenApi)]
#[openapi(
    paths(predict, recommend_societies),
    components(
        schemas(
            PredictRequest,
            Prediction,
            PlotPoint,
            RecommendRequest,
            Recommendations,
            Recommendation
        ),
        responses(InvalidInputResponse, NotFoundResponse, UpstreamUnavailableResponse)
    ),
    tags((name = TAG, description = "Price prediction and society recommendations"))
)]
pub struct ApiDoc;

pub fn router<B, R>(service: ValuationService<B, R>) -> Router
where
    B: ValuationBackend + 'static,
    R: SocietyRepository + 'static,
{
    Router::new()
        .route("/predict", post(predict))
        .route("/recommend-societies", post(recommend_societies))
        .with_state(Arc::new(service))
}

/// Predict the 2024 price for a plot in a known society
#[utoipa::path(
    post,
    path = "/predict",
    tag = TAG,
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Prediction with price history", body = Prediction),
        (status = 400, response = InvalidInputResponse),
        (status = 404, response = NotFoundResponse),
        (status = 502, response = UpstreamUnavailableResponse)
    )
)]
async fn predict<B: ValuationBackend, R: SocietyRepository>(
    State(service): State<SharedService<B, R>>,
    ValidatedJson(request): ValidatedJson<PredictRequest>,
) -> ValuationResult<Json<Prediction>> {
    Ok(Json(service.predict(request).await?))
}

/// Societies similar to the given city, price band and plot size
#[utoipa::path(
    post,
    path = "/recommend-societies",
    tag = TAG,
    request_body = RecommendRequest,
    responses(
        (status = 200, description = "Recommended societies", body = Recommendations),
        (status = 400, response = InvalidInputResponse),
        (status = 404, response = NotFoundResponse),
        (status = 502, response = UpstreamUnavailableResponse)
    )
)]
async fn recommend_societies<B: ValuationBackend, R: SocietyRepository>(
    State(service): State<SharedService<B, R>>,
    ValidatedJson(request): ValidatedJson<RecommendRequest>,
) -> ValuationResult<Json<Recommendations>> {
    Ok(Json(service.recommend(request).await?))
}
