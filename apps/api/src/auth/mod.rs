//! Auth gate — every request must present a credential the configured
//! `TokenVerifier` accepts before it reaches a handler.
//!
//! `AppState` holds an `Arc<dyn TokenVerifier>`; production wires in
//! `FirebaseVerifier`, tests wire in `testing::StaticVerifier`.

pub mod firebase;
pub mod middleware;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Verified identity claims, exactly as the verifier produced them.
/// Inserted into request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("malformed token")]
    Malformed,

    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("no signing key with id '{0}'")]
    UnknownKey(String),

    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("token issued in the future")]
    IssuedInFuture,

    #[error("token has an empty subject")]
    EmptySubject,

    #[error("failed to fetch signing keys: {0}")]
    KeyFetch(#[from] reqwest::Error),
}

/// Turns a raw credential into claims, or fails.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Claims, VerifyError>;
}
