use super::jwt::{JwtAuth, JwtClaims};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Bearer token from `Authorization`, falling back to the `access_token` cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.trim().to_string()))
        .or_else(|| {
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let (name, value) = cookie.trim().split_once('=')?;
                        (name == "access_token").then(|| value.to_string())
                    })
                })
        })
}

/// Verifies the caller's JWT and inserts [`JwtClaims`] into the request extensions.
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token_from_request(&headers).ok_or_else(|| {
        tracing::debug!("No JWT found in Authorization header or cookie");
        AppError::Unauthorized("No token provided".to_string())
    })?;

    let claims = auth.verify_token(&token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::Unauthorized("Invalid token".to_string())
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Rejects callers without the admin role. Must run after [`jwt_auth_middleware`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    match request.extensions().get::<JwtClaims>() {
        Some(claims) if claims.is_admin() => Ok(next.run(request).await),
        Some(claims) => {
            tracing::info!(user_id = %claims.sub, "Admin route denied");
            Err(AppError::Forbidden("Admin role required".to_string()))
        }
        None => Err(AppError::Unauthorized("Authentication required".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    fn app(auth: JwtAuth) -> Router {
        Router::new()
            .route("/admin", get(|| async { "ok" }))
            .layer(middleware::from_fn(require_admin))
            .layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
    }

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("middleware-test-secret-32-characters"))
    }

    async fn call(auth: JwtAuth, header: Option<(&str, String)>) -> StatusCode {
        let mut builder = HttpRequest::builder().uri("/admin");
        if let Some((name, value)) = header {
            builder = builder.header(name, value);
        }
        app(auth)
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        assert_eq!(call(auth(), None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let auth = auth();
        let token = auth
            .issue_token("u-2", "user@example.com", "User", &["USER".to_string()])
            .unwrap();
        let status = call(auth, Some(("authorization", format!("Bearer {}", token)))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_cookie_is_accepted() {
        let auth = auth();
        let token = auth
            .issue_token("u-1", "admin@example.com", "Admin", &["ADMIN".to_string()])
            .unwrap();
        let status = call(auth, Some(("cookie", format!("theme=dark; access_token={}", token)))).await;
        assert_eq!(status, StatusCode::OK);
    }
}
