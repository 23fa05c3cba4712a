pub mod protected;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::auth::middleware::authenticate;
use crate::curriculos::handlers;
use crate::state::AppState;

/// Every route, the fallback included, sits behind the auth gate.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_list))
        .route("/protegido", get(protected::protected_handler))
        .route("/curriculos", post(handlers::handle_create))
        .route(
            "/curriculos/:id",
            get(handlers::handle_get)
                .put(handlers::handle_update)
                .delete(handlers::handle_delete),
        )
        .layer(from_fn_with_state(state.verifier.clone(), authenticate))
        .with_state(state)
}
