use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::TokenVerifier;
use crate::errors::{AppError, AuthFailure};

/// Admits a request only if its `authorization` header verifies.
///
/// The header value is the raw token: no trimming and no `Bearer ` stripping.
/// An empty header counts as a missing credential.
/// On success the `Claims` are available to handlers as `Extension<Claims>`.
pub async fn authenticate(
    State(verifier): State<Arc<dyn TokenVerifier>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(raw) = request
        .headers()
        .get(AUTHORIZATION)
        .filter(|v| !v.is_empty())
    else {
        warn!(path = %request.uri().path(), "credential missing, authentication denied");
        return Err(AppError::Unauthenticated(AuthFailure::MissingCredential));
    };

    let token = raw
        .to_str()
        .map_err(|_| {
            warn!("credential is not visible ASCII, authentication denied");
            AppError::Unauthenticated(AuthFailure::VerificationFailed)
        })?
        .to_owned();

    let claims = verifier.verify(&token).await.map_err(|e| {
        warn!(error = %e, "token verification failed");
        AppError::Unauthenticated(AuthFailure::VerificationFailed)
    })?;

    debug!(sub = %claims.sub, "request authenticated");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::{claims_for, StaticVerifier};
    use crate::auth::Claims;
    use axum::{
        body::Body,
        http::{header::HeaderValue, Request, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Extension, Json, Router,
    };
    use tower::ServiceExt;

    async fn echo_claims(Extension(claims): Extension<Claims>) -> Json<Claims> {
        Json(claims)
    }

    fn app() -> Router {
        let verifier: Arc<dyn TokenVerifier> =
            Arc::new(StaticVerifier::default().with_token("good-token", claims_for("uid-1")));
        Router::new()
            .route("/whoami", get(echo_claims))
            .layer(from_fn_with_state(verifier, authenticate))
    }

    async fn send(request: Request<Body>) -> Response {
        app().oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let response = send(Request::get("/whoami").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_rejected_token_is_401() {
        let response = send(
            Request::get("/whoami")
                .header(AUTHORIZATION, "forged-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bearer_prefix_is_not_stripped() {
        let response = send(
            Request::get("/whoami")
                .header(AUTHORIZATION, "Bearer good-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_ascii_header_is_verification_failure() {
        let mut request = Request::get("/whoami").body(Body::empty()).unwrap();
        request.headers_mut().insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"good-token\xff").unwrap(),
        );
        let response = send(request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_accepted_token_attaches_exact_claims() {
        let response = send(
            Request::get("/whoami")
                .header(AUTHORIZATION, "good-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let claims: Claims = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(claims, claims_for("uid-1"));
    }

    #[tokio::test]
    async fn test_unknown_path_still_requires_credential() {
        let response = send(Request::get("/nowhere").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_empty_header_counts_as_missing() {
        let response = send(
            Request::get("/whoami")
                .header(AUTHORIZATION, "")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["message"], "Authentication token not provided");
    }
}
