//! Firebase ID token verification.
//!
//! Tokens are RS256 JWTs signed by one of Google's rotating `securetoken` keys.
//! The key set is fetched lazily and cached for as long as Google's
//! `Cache-Control: max-age` allows.

use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use reqwest::{header::CACHE_CONTROL, Client};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::auth::{Claims, TokenVerifier, VerifyError};

const JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
const ISSUER_PREFIX: &str = "https://securetoken.google.com/";
const DEFAULT_KEY_TTL: Duration = Duration::from_secs(3600);
/// Unknown `kid`s trigger a refetch at most this often.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);
/// Seconds of clock skew tolerated on `exp` and `iat`.
const LEEWAY_SECS: u64 = 60;

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
    expires_at: Instant,
}

pub struct FirebaseVerifier {
    client: Client,
    jwks_url: String,
    validation: Validation,
    keys: RwLock<Option<CachedKeys>>,
}

impl FirebaseVerifier {
    pub fn new(project_id: &str) -> Result<Self> {
        Self::with_jwks_url(project_id, JWKS_URL)
    }

    /// Same as `new`, but fetches signing keys from `jwks_url`.
    pub fn with_jwks_url(project_id: &str, jwks_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            jwks_url: jwks_url.to_string(),
            validation: firebase_validation(project_id),
            keys: RwLock::new(None),
        })
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, VerifyError> {
        let now = Instant::now();
        {
            let guard = self.keys.read().await;
            if let Some(cached) = guard.as_ref() {
                if now < cached.expires_at {
                    if let Some(jwk) = cached.keys.find(kid) {
                        return Ok(DecodingKey::from_jwk(jwk)?);
                    }
                    if now.duration_since(cached.fetched_at) < MIN_REFRESH_INTERVAL {
                        return Err(VerifyError::UnknownKey(kid.to_string()));
                    }
                }
            }
        }

        // Cached even without `kid`: `fetched_at` gates the next refetch.
        let fresh = self.fetch_keys().await?;
        let mut guard = self.keys.write().await;
        let cached = guard.insert(fresh);
        match cached.keys.find(kid) {
            Some(jwk) => Ok(DecodingKey::from_jwk(jwk)?),
            None => Err(VerifyError::UnknownKey(kid.to_string())),
        }
    }

    async fn fetch_keys(&self) -> Result<CachedKeys, VerifyError> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?;

        let ttl = response
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_max_age)
            .unwrap_or(DEFAULT_KEY_TTL);

        let keys: JwkSet = response.json().await?;
        info!(
            "Fetched {} Firebase signing keys (cached for {}s)",
            keys.keys.len(),
            ttl.as_secs()
        );

        let fetched_at = Instant::now();
        Ok(CachedKeys {
            keys,
            fetched_at,
            expires_at: fetched_at + ttl,
        })
    }
}

#[async_trait]
impl TokenVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        let header = decode_header(token).map_err(|_| VerifyError::Malformed)?;
        if header.alg != Algorithm::RS256 {
            return Err(VerifyError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
        }
        let kid = header.kid.ok_or(VerifyError::Malformed)?;

        let key = self.decoding_key(&kid).await?;
        let data = decode::<Claims>(token, &key, &self.validation)?;
        check_subject_and_times(&data.claims, chrono::Utc::now().timestamp())?;

        debug!(sub = %data.claims.sub, "Firebase token verified");
        Ok(data.claims)
    }
}

fn firebase_validation(project_id: &str) -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[project_id]);
    validation.set_issuer(&[format!("{ISSUER_PREFIX}{project_id}")]);
    validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);
    validation.leeway = LEEWAY_SECS;
    validation
}

/// Checks the Firebase-specific rules `jsonwebtoken` does not cover:
/// a non-empty `sub`, and `iat` / `auth_time` not in the future.
fn check_subject_and_times(claims: &Claims, now: i64) -> Result<(), VerifyError> {
    if claims.sub.is_empty() {
        return Err(VerifyError::EmptySubject);
    }

    let latest = now + LEEWAY_SECS as i64;
    let iat = claims
        .extra
        .get("iat")
        .and_then(|v| v.as_i64())
        .ok_or(VerifyError::Malformed)?;
    if iat > latest {
        return Err(VerifyError::IssuedInFuture);
    }
    if let Some(auth_time) = claims.extra.get("auth_time").and_then(|v| v.as_i64()) {
        if auth_time > latest {
            return Err(VerifyError::IssuedInFuture);
        }
    }
    Ok(())
}

/// Extracts `max-age` from a `Cache-Control` header value.
fn parse_max_age(cache_control: &str) -> Option<Duration> {
    cache_control
        .split(',')
        .filter_map(|directive| directive.trim().strip_prefix("max-age="))
        .find_map(|secs| secs.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
