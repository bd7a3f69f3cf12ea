use axum::{Router, middleware};
use axum_helpers::{JwtAuth, jwt_auth_middleware, require_admin};
use domain_cost_estimation::{CostEstimationService, ReferenceDataRepository};
use domain_engagement::{EngagementService, ReviewRepository, SearchHistoryRepository};
use domain_societies::{PlacesProvider, SocietyRepository, SocietyService};
use domain_valuation::{ValuationBackend, ValuationService};

pub mod cost_estimation;
pub mod engagement;
pub mod health;
pub mod societies;
pub mod valuation;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by the `create_router` helper.
pub fn routes(state: &crate::state::AppState) -> Router {
    compose(
        cost_estimation::service(state),
        societies::service(state),
        valuation::service(state),
        engagement::service(state),
        state.jwt_auth.clone(),
    )
}

/// Public domain routes, member routes that need any valid JWT, and
/// `/admin`, which requires an admin JWT.
pub fn compose<RR, SR, P, B, VR, ER, EH, ES>(
    cost: CostEstimationService<RR>,
    societies: SocietyService<SR, P>,
    valuation: ValuationService<B, VR>,
    engagement: EngagementService<ER, EH, ES>,
    auth: JwtAuth,
) -> Router
where
    RR: ReferenceDataRepository + Clone + 'static,
    SR: SocietyRepository + Clone + 'static,
    P: PlacesProvider + Clone + 'static,
    B: ValuationBackend + 'static,
    VR: SocietyRepository + 'static,
    ER: ReviewRepository + Clone + 'static,
    EH: SearchHistoryRepository + Clone + 'static,
    ES: SocietyRepository + Clone + 'static,
{
    let admin = Router::new()
        .merge(domain_cost_estimation::handlers::admin_router(cost.clone()))
        .merge(domain_societies::handlers::admin_router(societies.clone()))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(auth.clone(), jwt_auth_middleware));

    let members = domain_engagement::handlers::member_router(engagement.clone())
        .layer(middleware::from_fn_with_state(auth, jwt_auth_middleware));

    Router::new()
        .merge(domain_cost_estimation::handlers::router(cost))
        .merge(domain_societies::handlers::router(societies))
        .merge(domain_valuation::handlers::router(valuation))
        .merge(domain_engagement::handlers::router(engagement))
        .merge(members)
        .nest("/admin", admin)
}

/// Creates a router with the /ready endpoint that checks Postgres.
///
/// This router has state applied and can be merged with the stateless app
/// router from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::JwtConfig;
    use domain_cost_estimation::{CostEstimator, InMemoryReferenceDataRepository};
    use domain_engagement::{InMemoryReviewRepository, InMemorySearchHistoryRepository};
    use domain_societies::{
        AmenityAggregator, GeoPoint, InMemorySocietyRepository, Place, PlacesConfig, PlacesError,
        SearchConfig,
    };
    use domain_valuation::{
        PredictorRequest, Prediction, RecommendRequest, Recommendations, ValuationError,
        ValuationResult,
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[derive(Clone)]
    struct NoPlaces;

    #[async_trait]
    impl PlacesProvider for NoPlaces {
        async fn nearby(&self, _: GeoPoint, _: u32, _: &str) -> Result<Vec<Place>, PlacesError> {
            Ok(Vec::new())
        }
    }

    struct Offline;

    #[async_trait]
    impl ValuationBackend for Offline {
        async fn predict(&self, _: &PredictorRequest) -> ValuationResult<Prediction> {
            Err(ValuationError::Upstream("offline".to_string()))
        }

        async fn recommend(&self, _: &RecommendRequest) -> ValuationResult<Recommendations> {
            Err(ValuationError::Upstream("offline".to_string()))
        }
    }

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("estate-api-test-secret-of-32-chars!"))
    }

    fn app() -> Router {
        let societies = InMemorySocietyRepository::new();
        let aggregator = AmenityAggregator::new(Arc::new(NoPlaces), &PlacesConfig::new("key"));
        compose(
            CostEstimationService::new(
                InMemoryReferenceDataRepository::seeded(),
                CostEstimator::default(),
            ),
            SocietyService::new(societies.clone(), aggregator, SearchConfig::default()),
            ValuationService::new(Offline, societies.clone()),
            EngagementService::new(
                InMemoryReviewRepository::new(),
                InMemorySearchHistoryRepository::new(),
                societies,
            ),
            auth(),
        )
    }

    fn create_society(token: Option<String>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/admin/societies")
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        builder
            .body(Body::from(
                json!({ "name": "Bahria Town", "city": "Islamabad" }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn test_admin_routes_require_token() {
        let response = app().oneshot(create_society(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_routes_require_admin_role() {
        let token = auth()
            .issue_token("u-2", "user@example.com", "User", &["USER".to_string()])
            .unwrap();
        let response = app().oneshot(create_society(Some(token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_token_creates_society_visible_to_search() {
        let app = app();
        let token = auth()
            .issue_token("u-1", "admin@example.com", "Admin", &["ADMIN".to_string()])
            .unwrap();

        let response = app.clone().oneshot(create_society(Some(token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/societies?city=Islamabad&query=bahria")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body[0]["name"], "Bahria Town");
    }

    #[tokio::test]
    async fn test_public_routes_need_no_token() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/reference-data")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    fn record_search(token: Option<String>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/user-search/record-search")
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        builder
            .body(Body::from(
                json!({ "society_id": uuid::Uuid::now_v7() }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn test_member_routes_require_token() {
        let response = app().oneshot(record_search(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_member_routes_accept_any_role() {
        let token = auth()
            .issue_token(
                &uuid::Uuid::now_v7().to_string(),
                "user@example.com",
                "User",
                &["USER".to_string()],
            )
            .unwrap();
        // Past auth; the random society id is unknown
        let response = app().oneshot(record_search(Some(token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reading_reviews_needs_no_token() {
        let response = app()
            .oneshot(Request::builder().uri("/reviews").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_valuation_outage_is_bad_gateway() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/recommend-societies")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({ "city": "Lahore", "price_bin": "high", "marla": 5 }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
