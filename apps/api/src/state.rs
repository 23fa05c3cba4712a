use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::curriculos::service::CurriculoService;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never torn down.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable token verifier. Default: FirebaseVerifier.
    pub verifier: Arc<dyn TokenVerifier>,
    pub curriculos: CurriculoService,
}
