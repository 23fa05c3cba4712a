use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Why the auth gate turned a request away. Only the variant reaches the client,
/// never the underlying verification error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingCredential,
    VerificationFailed,
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthenticated: {0:?}")]
    Unauthenticated(AuthFailure),

    #[error("Storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Unauthenticated(failure) => {
                let message = match failure {
                    AuthFailure::MissingCredential => "Authentication token not provided",
                    AuthFailure::VerificationFailed => "Authentication failed",
                };
                (
                    StatusCode::UNAUTHORIZED,
                    json!({ "error": { "code": "UNAUTHENTICATED", "message": message } }),
                )
            }
            // Store failures stay a 400 carrying the raw error, as existing clients expect.
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": {
                            "code": "STORAGE_FAILURE",
                            "message": e.to_string(),
                            "detail": storage_detail(e),
                        }
                    }),
                )
            }
            AppError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": { "code": "INVALID_REQUEST", "message": msg } }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Serializes the underlying store error, keeping the Postgres fields when present.
fn storage_detail(err: &sqlx::Error) -> Value {
    match err {
        sqlx::Error::Database(db) => json!({
            "code": db.code(),
            "message": db.message(),
            "constraint": db.constraint(),
            "table": db.table(),
        }),
        other => json!({ "message": other.to_string() }),
    }
}
