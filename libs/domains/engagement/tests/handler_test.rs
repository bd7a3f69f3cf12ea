//! Handler tests for the engagement domain.
//!
//! Claims are injected as a request extension; the JWT middleware and the
//! `/api` prefix are not involved.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Extension, Router};
use axum_helpers::JwtClaims;
use domain_engagement::*;
use domain_societies::{CreateSociety, InMemorySocietyRepository, Society, SocietyRepository};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

type Service =
    EngagementService<InMemoryReviewRepository, InMemorySearchHistoryRepository, InMemorySocietyRepository>;

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn claims(user_id: Uuid, name: &str) -> JwtClaims {
    JwtClaims {
        sub: user_id.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        name: name.to_string(),
        roles: vec!["USER".to_string()],
        exp: i64::MAX,
        iat: 0,
        jti: Uuid::now_v7().to_string(),
    }
}

struct Fixture {
    service: Service,
    society: Society,
}

async fn fixture() -> Fixture {
    let societies = InMemorySocietyRepository::new();
    let society = societies
        .create(Society::new(CreateSociety {
            name: "Bahria Town".to_string(),
            city: "Islamabad".to_string(),
            latitude: Some(33.52),
            longitude: Some(73.10),
        }))
        .await
        .unwrap();
    societies
        .create(Society::new(CreateSociety {
            name: "DHA Phase 2".to_string(),
            city: "Islamabad".to_string(),
            latitude: Some(33.53),
            longitude: Some(73.15),
        }))
        .await
        .unwrap();

    Fixture {
        service: EngagementService::new(
            InMemoryReviewRepository::new(),
            InMemorySearchHistoryRepository::new(),
            societies,
        ),
        society,
    }
}

/// Public and member routes merged, acting as `claims`
fn app(service: Service, claims: JwtClaims) -> Router {
    Router::new()
        .merge(handlers::router(service.clone()))
        .merge(handlers::member_router(service).layer(Extension(claims)))
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_society_review_round_trip() {
    let Fixture { service, society } = fixture().await;
    let app = app(service, claims(Uuid::now_v7(), "Ali"));

    let response = app
        .clone()
        .oneshot(post(
            &format!("/society/{}/reviews", society.id),
            json!({ "rating": 4, "comment": "Wide roads" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response.into_body()).await;
    assert_eq!(created["user_name"], "Ali");

    let response = app
        .oneshot(get(&format!("/society/{}/reviews", society.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = json_body(response.into_body()).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["comment"], "Wide roads");
}

#[tokio::test]
async fn test_rating_out_of_range_is_400() {
    let Fixture { service, society } = fixture().await;
    let response = app(service, claims(Uuid::now_v7(), "Ali"))
        .oneshot(post(
            &format!("/society/{}/reviews", society.id),
            json!({ "rating": 9 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_for_unknown_society_is_404() {
    let Fixture { service, .. } = fixture().await;
    let response = app(service, claims(Uuid::now_v7(), "Ali"))
        .oneshot(post(
            &format!("/society/{}/reviews", Uuid::now_v7()),
            json!({ "rating": 3 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_uuid_subject_is_401() {
    let Fixture { service, .. } = fixture().await;
    let mut odd = claims(Uuid::now_v7(), "Ali");
    odd.sub = "service-account".to_string();

    let response = app(service, odd)
        .oneshot(post("/reviews", json!({ "rating": 5 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_top_trending_requires_city() {
    let Fixture { service, .. } = fixture().await;
    let response = app(service, claims(Uuid::now_v7(), "Ali"))
        .oneshot(get("/top-trending-societies"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_top_trending_orders_by_review_count() {
    let Fixture { service, society } = fixture().await;
    let app = app(service, claims(Uuid::now_v7(), "Ali"));
    for rating in [5, 4] {
        let response = app
            .clone()
            .oneshot(post(
                &format!("/society/{}/reviews", society.id),
                json!({ "rating": rating }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(get("/top-trending-societies?city=Islamabad"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body[0]["name"], "Bahria Town");
    assert_eq!(body[0]["review_count"], 2);
    assert_eq!(body[1]["review_count"], 0);
}

#[tokio::test]
async fn test_site_reviews_are_public_to_read() {
    let Fixture { service, .. } = fixture().await;
    let app = app(service, claims(Uuid::now_v7(), "Sara"));

    let response = app
        .clone()
        .oneshot(post("/reviews", json!({ "rating": 5, "comment": "Useful" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/reviews")).await.unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body[0]["user_name"], "Sara");
}

#[tokio::test]
async fn test_search_history_is_scoped_to_caller() {
    let Fixture { service, society } = fixture().await;
    let (ali, sara) = (Uuid::now_v7(), Uuid::now_v7());
    let ali_app = app(service.clone(), claims(ali, "Ali"));
    let sara_app = app(service, claims(sara, "Sara"));

    for app in [&ali_app, &sara_app] {
        let response = app
            .clone()
            .oneshot(post(
                "/user-search/record-search",
                json!({ "society_id": society.id }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = ali_app
        .clone()
        .oneshot(get("/user-search/search-history"))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["searches"].as_array().unwrap().len(), 1);
    assert_eq!(body["searches"][0]["society_name"], "Bahria Town");
    assert_eq!(body["searches"][0]["city_name"], "Islamabad");
    assert_eq!(body["searches"][0]["user_name"], "Ali");

    let response = ali_app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/user-search/delete-all")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await["deleted"], 1);

    let response = sara_app
        .oneshot(get("/user-search/search-history"))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["searches"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_trends_report_for_society() {
    let Fixture { service, society } = fixture().await;
    let app = app(service, claims(Uuid::now_v7(), "Ali"));
    app.clone()
        .oneshot(post(
            "/user-search/record-search",
            json!({ "society_id": society.id }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(get(&format!("/society-trends/trends/{}", society.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["search_count"], 1);
    assert_eq!(body["trend"], "Declining");
    assert_eq!(body["similar_societies"][0]["name"], "DHA Phase 2");
}

#[tokio::test]
async fn test_trends_for_unknown_society_is_404() {
    let Fixture { service, .. } = fixture().await;
    let response = app(service, claims(Uuid::now_v7(), "Ali"))
        .oneshot(get(&format!("/society-trends/trends/{}", Uuid::now_v7())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
