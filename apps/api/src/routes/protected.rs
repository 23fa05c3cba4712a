use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::auth::Claims;

/// GET /protegido
/// Echoes the claims the auth gate attached to this request.
pub async fn protected_handler(Extension(claims): Extension<Claims>) -> Json<Value> {
    Json(json!({
        "message": "Rota protegida",
        "user": claims
    }))
}
