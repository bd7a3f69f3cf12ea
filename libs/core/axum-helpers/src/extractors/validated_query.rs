use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query-string counterpart of [`ValidatedJson`](super::ValidatedJson).
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state).await?;
        params.validate()?;
        Ok(ValidatedQuery(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Params {
        #[validate(range(min = 1, max = 50))]
        limit: u32,
    }

    async fn handler(ValidatedQuery(params): ValidatedQuery<Params>) -> String {
        params.limit.to_string()
    }

    async fn status_for(uri: &str) -> StatusCode {
        Router::new()
            .route("/items", get(handler))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_query_reaches_handler() {
        assert_eq!(status_for("/items?limit=5").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_out_of_range_is_bad_request() {
        assert_eq!(status_for("/items?limit=0").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unparseable_is_bad_request() {
        assert_eq!(status_for("/items?limit=many").await, StatusCode::BAD_REQUEST);
    }
}
