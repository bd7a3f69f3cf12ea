use axum::{
    Extension, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, JwtClaims, UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        InvalidInputResponse, NotFoundResponse, StoreUnavailableResponse, UnauthorizedResponse,
    },
};
use domain_societies::{Society, SocietyRepository};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EngagementResult;
use crate::models::{
    Author, ClearedHistory, CreateReview, NearbySociety, RecordSearch, SearchHistory,
    SearchRecord, SiteReview, SocietyReview, Trend, TrendReport, TrendingQuery, TrendingSociety,
};
use crate::repository::{ReviewRepository, SearchHistoryRepository};
use crate::service::EngagementService;

const TAG: &str = "engagement";

type SharedService<R, H, S> = Arc<EngagementService<R, H, S>>;

/// OpenAPI documentation for reviews, search history and trends
#[derive(OpenApi)]
#[openapi(
    paths(
        list_society_reviews,
        review_society,
        top_trending,
        list_site_reviews,
        review_site,
        record_search,
        search_history,
        clear_history,
        society_trends
    ),
    components(
        schemas(
            SocietyReview,
            SiteReview,
            CreateReview,
            RecordSearch,
            SearchRecord,
            SearchHistory,
            ClearedHistory,
            TrendingSociety,
            TrendReport,
            Trend,
            NearbySociety,
            Society
        ),
        responses(
            InvalidInputResponse,
            NotFoundResponse,
            UnauthorizedResponse,
            StoreUnavailableResponse
        )
    ),
    tags((name = TAG, description = "Reviews, search history and society trends"))
)]
pub struct ApiDoc;

/// Routes anyone may call
pub fn router<R, H, S>(service: EngagementService<R, H, S>) -> Router
where
    R: ReviewRepository + 'static,
    H: SearchHistoryRepository + 'static,
    S: SocietyRepository + 'static,
{
    Router::new()
        .route("/society/{id}/reviews", get(list_society_reviews))
        .route("/top-trending-societies", get(top_trending))
        .route("/reviews", get(list_site_reviews))
        .route("/society-trends/trends/{id}", get(society_trends))
        .with_state(Arc::new(service))
}

/// Routes acting for the signed-in user. Callers must layer authentication on top.
pub fn member_router<R, H, S>(service: EngagementService<R, H, S>) -> Router
where
    R: ReviewRepository + 'static,
    H: SearchHistoryRepository + 'static,
    S: SocietyRepository + 'static,
{
    Router::new()
        .route("/society/{id}/reviews", post(review_society))
        .route("/reviews", post(review_site))
        .route("/user-search/record-search", post(record_search))
        .route("/user-search/search-history", get(search_history))
        .route("/user-search/delete-all", delete(clear_history))
        .with_state(Arc::new(service))
}

/// Reviews of one society, newest first
#[utoipa::path(
    get,
    path = "/society/{id}/reviews",
    tag = TAG,
    params(("id" = uuid::Uuid, Path, description = "Society id")),
    responses(
        (status = 200, description = "Reviews", body = Vec<SocietyReview>),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn list_society_reviews<R, H, S>(
    State(service): State<SharedService<R, H, S>>,
    UuidPath(id): UuidPath,
) -> EngagementResult<Json<Vec<SocietyReview>>>
where
    R: ReviewRepository,
    H: SearchHistoryRepository,
    S: SocietyRepository,
{
    Ok(Json(service.society_reviews(id).await?))
}

/// Review a society as the signed-in user
#[utoipa::path(
    post,
    path = "/society/{id}/reviews",
    tag = TAG,
    params(("id" = uuid::Uuid, Path, description = "Society id")),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review stored", body = SocietyReview),
        (status = 400, response = InvalidInputResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn review_society<R, H, S>(
    State(service): State<SharedService<R, H, S>>,
    Extension(claims): Extension<JwtClaims>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> EngagementResult<(StatusCode, Json<SocietyReview>)>
where
    R: ReviewRepository,
    H: SearchHistoryRepository,
    S: SocietyRepository,
{
    let author = Author::from_claims(&claims)?;
    let review = service.review_society(id, author, input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Top ten societies in a city by review count
#[utoipa::path(
    get,
    path = "/top-trending-societies",
    tag = TAG,
    params(TrendingQuery),
    responses(
        (status = 200, description = "Most reviewed first", body = Vec<TrendingSociety>),
        (status = 400, response = InvalidInputResponse)
    )
)]
async fn top_trending<R, H, S>(
    State(service): State<SharedService<R, H, S>>,
    ValidatedQuery(query): ValidatedQuery<TrendingQuery>,
) -> EngagementResult<Json<Vec<TrendingSociety>>>
where
    R: ReviewRepository,
    H: SearchHistoryRepository,
    S: SocietyRepository,
{
    Ok(Json(service.top_trending(query).await?))
}

/// Reviews of the site, newest first
#[utoipa::path(
    get,
    path = "/reviews",
    tag = TAG,
    responses(
        (status = 200, description = "Site reviews", body = Vec<SiteReview>),
        (status = 503, response = StoreUnavailableResponse)
    )
)]
async fn list_site_reviews<R, H, S>(
    State(service): State<SharedService<R, H, S>>,
) -> EngagementResult<Json<Vec<SiteReview>>>
where
    R: ReviewRepository,
    H: SearchHistoryRepository,
    S: SocietyRepository,
{
    Ok(Json(service.site_reviews().await?))
}

/// Review the site as the signed-in user
#[utoipa::path(
    post,
    path = "/reviews",
    tag = TAG,
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review stored", body = SiteReview),
        (status = 400, response = InvalidInputResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn review_site<R, H, S>(
    State(service): State<SharedService<R, H, S>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> EngagementResult<(StatusCode, Json<SiteReview>)>
where
    R: ReviewRepository,
    H: SearchHistoryRepository,
    S: SocietyRepository,
{
    let author = Author::from_claims(&claims)?;
    let review = service.review_site(author, input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Remember that the signed-in user looked at a society
#[utoipa::path(
    post,
    path = "/user-search/record-search",
    tag = TAG,
    request_body = RecordSearch,
    responses(
        (status = 201, description = "Search recorded", body = SearchRecord),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn record_search<R, H, S>(
    State(service): State<SharedService<R, H, S>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(input): ValidatedJson<RecordSearch>,
) -> EngagementResult<(StatusCode, Json<SearchRecord>)>
where
    R: ReviewRepository,
    H: SearchHistoryRepository,
    S: SocietyRepository,
{
    let author = Author::from_claims(&claims)?;
    let record = service.record_search(author, input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// The signed-in user's searches, newest first
#[utoipa::path(
    get,
    path = "/user-search/search-history",
    tag = TAG,
    responses(
        (status = 200, description = "Search history", body = SearchHistory),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn search_history<R, H, S>(
    State(service): State<SharedService<R, H, S>>,
    Extension(claims): Extension<JwtClaims>,
) -> EngagementResult<Json<SearchHistory>>
where
    R: ReviewRepository,
    H: SearchHistoryRepository,
    S: SocietyRepository,
{
    let author = Author::from_claims(&claims)?;
    Ok(Json(service.search_history(author.id).await?))
}

/// Delete the signed-in user's search history
#[utoipa::path(
    delete,
    path = "/user-search/delete-all",
    tag = TAG,
    responses(
        (status = 200, description = "History cleared", body = ClearedHistory),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn clear_history<R, H, S>(
    State(service): State<SharedService<R, H, S>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
) -> EngagementResult<Json<ClearedHistory>>
where
    R: ReviewRepository,
    H: SearchHistoryRepository,
    S: SocietyRepository,
{
    let author = Author::from_claims(&claims)?;
    let cleared = service.clear_history(author.id).await?;
    AuditEvent::by(
        &claims,
        &headers,
        "search_history.clear",
        format!("user:{}", author.id),
        AuditOutcome::Success,
    )
    .with_details(json!({ "deleted": cleared.deleted }))
    .log();
    Ok(Json(cleared))
}

/// Search trend and nearest societies for one society
#[utoipa::path(
    get,
    path = "/society-trends/trends/{id}",
    tag = TAG,
    params(("id" = uuid::Uuid, Path, description = "Society id")),
    responses(
        (status = 200, description = "Trend report", body = TrendReport),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn society_trends<R, H, S>(
    State(service): State<SharedService<R, H, S>>,
    UuidPath(id): UuidPath,
) -> EngagementResult<Json<TrendReport>>
where
    R: ReviewRepository,
    H: SearchHistoryRepository,
    S: SocietyRepository,
{
    Ok(Json(service.trends(id).await?))
}
