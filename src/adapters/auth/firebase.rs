//! Firebase ID token verification.
//!
//! Implements the `TokenVerifier` port. A token is accepted when:
//!
//! 1. its `kid` names a key in Google's published JWKS (cached),
//! 2. the RS256 signature verifies against that key,
//! 3. `iss` is `https://securetoken.google.com/<project>` and `aud` is the project,
//! 4. `exp` is in the future, `iat` is not, and `sub` is a non-empty uid.
//!
//! The full decoded claim set is passed through on `AuthenticatedUser`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::config::FirebaseConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, FirebaseUid};
use crate::ports::TokenVerifier;

/// Allowed clock skew for `exp` and `iat`.
const CLOCK_SKEW_SECS: u64 = 60;

/// Unknown `kid`s trigger at most one refetch per interval.
const MIN_REFETCH_INTERVAL: Duration = Duration::from_secs(30);

struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
    ttl: Duration,
}

impl JwksCache {
    fn new(jwks: JwkSet, ttl: Duration) -> Self {
        Self {
            jwks,
            fetched_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() > self.ttl
    }

    fn may_refetch(&self, min_interval: Duration) -> bool {
        self.fetched_at.elapsed() >= min_interval
    }
}

/// Verifies Firebase ID tokens against Google's signing keys.
pub struct FirebaseTokenVerifier {
    project_id: String,
    issuer: String,
    jwks_url: String,
    cache_ttl: Duration,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl FirebaseTokenVerifier {
    /// Keys are fetched lazily on first verification.
    pub fn new(config: &FirebaseConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("HTTP client: {}", e)))?;

        if let Some(ref host) = config.emulator_host {
            tracing::warn!(
                %host,
                "Auth emulator configured; ID tokens are still verified against the JWKS, \
                 so unsigned emulator tokens will be rejected"
            );
        }

        Ok(Self {
            project_id: config.project_id.clone(),
            issuer: config.issuer(),
            jwks_url: config.jwks_url.clone(),
            cache_ttl: config.jwks_cache_ttl(),
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        })
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        tracing::debug!(url = %self.jwks_url, "Fetching Firebase signing keys");

        let response = self
            .http_client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch JWKS");
                AuthError::service_unavailable(format!("Failed to fetch JWKS: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, "JWKS endpoint returned an error");
            return Err(AuthError::service_unavailable(format!(
                "JWKS endpoint returned {}",
                status
            )));
        }

        response.json::<JwkSet>().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse JWKS");
            AuthError::service_unavailable(format!("Failed to parse JWKS: {}", e))
        })
    }

    /// Cached keys, refetched when stale or when `kid` is unknown.
    ///
    /// Unknown `kid`s refetch at most once per `MIN_REFETCH_INTERVAL`, so a
    /// stream of tokens with made-up key ids cannot hammer the JWKS endpoint.
    async fn jwks_for(&self, kid: &str) -> Result<JwkSet, AuthError> {
        if let Some(jwks) = self.cached_jwks(kid).await {
            return Ok(jwks);
        }

        let mut cache = self.jwks_cache.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(ref cached) = *cache {
            if !cached.is_expired()
                && (cached.jwks.find(kid).is_some() || !cached.may_refetch(MIN_REFETCH_INTERVAL))
            {
                return Ok(cached.jwks.clone());
            }
        }

        let jwks = self.fetch_jwks().await?;
        *cache = Some(JwksCache::new(jwks.clone(), self.cache_ttl));
        Ok(jwks)
    }

    async fn cached_jwks(&self, kid: &str) -> Option<JwkSet> {
        let cache = self.jwks_cache.read().await;
        let cached = cache.as_ref()?;
        if cached.is_expired() {
            return None;
        }
        if cached.jwks.find(kid).is_none() {
            if cached.may_refetch(MIN_REFETCH_INTERVAL) {
                return None;
            }
            tracing::debug!(%kid, "Unknown key id, refetch throttled");
        }
        Some(cached.jwks.clone())
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.project_id]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "aud", "sub"]);
        validation.leeway = CLOCK_SKEW_SECS;
        validation
    }

    fn decode_claims(&self, token: &str, key: &DecodingKey) -> Result<Map<String, Value>, AuthError> {
        decode::<Map<String, Value>>(token, key, &self.validation())
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("ID token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::warn!(error = %e, "ID token rejected");
                        AuthError::InvalidToken
                    }
                }
            })
    }
}

/// Identity extracted from already-verified claims.
fn user_from_claims(claims: Map<String, Value>) -> Result<AuthenticatedUser, AuthError> {
    let issued_at = claims.get("iat").and_then(Value::as_i64).unwrap_or(i64::MAX);
    if issued_at > Utc::now().timestamp() + CLOCK_SKEW_SECS as i64 {
        tracing::warn!("ID token issued in the future");
        return Err(AuthError::InvalidToken);
    }

    let uid = claims
        .get("sub")
        .and_then(Value::as_str)
        .and_then(|sub| FirebaseUid::new(sub).ok())
        .ok_or_else(|| {
            tracing::warn!("ID token has an unusable subject");
            AuthError::InvalidToken
        })?;
    let email = claims
        .get("email")
        .and_then(Value::as_str)
        .map(String::from);
    let email_verified = claims
        .get("email_verified")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(AuthenticatedUser::new(uid, email, email_verified).with_claims(claims))
}

#[async_trait]
impl TokenVerifier for FirebaseTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!(error = %e, "Malformed ID token header");
            AuthError::InvalidToken
        })?;
        if header.alg != Algorithm::RS256 {
            tracing::warn!(alg = ?header.alg, "ID token uses an unexpected algorithm");
            return Err(AuthError::InvalidToken);
        }
        let kid = header.kid.ok_or_else(|| {
            tracing::warn!("ID token missing 'kid' header");
            AuthError::InvalidToken
        })?;

        let jwks = self.jwks_for(&kid).await?;
        let jwk = jwks.find(&kid).ok_or_else(|| {
            tracing::warn!(%kid, "No signing key matches ID token");
            AuthError::InvalidToken
        })?;
        let key = DecodingKey::from_jwk(jwk).map_err(|e| {
            tracing::warn!(error = %e, "Unusable signing key");
            AuthError::InvalidToken
        })?;

        user_from_claims(self.decode_claims(token, &key)?)
    }
}

impl std::fmt::Debug for FirebaseTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseTokenVerifier")
            .field("project_id", &self.project_id)
            .field("jwks_url", &self.jwks_url)
            .finish_non_exhaustive()
    }
}
