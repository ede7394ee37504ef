//! Firebase Authentication admin client.
//!
//! Implements the `IdentityProvider` port over the Identity Toolkit v1 REST
//! API. Requests are authorized with an OAuth2 access token obtained through
//! the JWT bearer grant using the service-account key. Against the Auth
//! emulator the literal `Bearer owner` is sent instead.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;

use crate::config::FirebaseConfig;
use crate::domain::foundation::{AuthError, FirebaseUid, NewRemoteIdentity, RemoteIdentity};
use crate::ports::IdentityProvider;

const CUSTOM_TOKEN_AUDIENCE: &str =
    "https://identitytoolkit.googleapis.com/google.identity.identitytoolkit.v1.IdentityToolkit";
const OAUTH_SCOPES: &str =
    "https://www.googleapis.com/auth/cloud-platform https://www.googleapis.com/auth/identitytoolkit";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;
/// Access tokens are refreshed this long before they expire.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Service-account signing material.
struct ServiceAccount {
    client_email: String,
    key: EncodingKey,
}

struct CachedAccessToken {
    token: String,
    expires_at: Instant,
}

impl CachedAccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + REFRESH_MARGIN < self.expires_at
    }
}

#[derive(Serialize)]
struct GrantAssertion<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Serialize)]
struct CustomTokenClaims<'a> {
    iss: &'a str,
    sub: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
    uid: &'a str,
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    disabled: bool,
}

impl TryFrom<AccountInfo> for RemoteIdentity {
    type Error = AuthError;

    fn try_from(info: AccountInfo) -> Result<Self, Self::Error> {
        let uid = FirebaseUid::new(info.local_id)
            .map_err(|e| AuthError::service_unavailable(format!("Invalid uid in response: {}", e)))?;
        Ok(RemoteIdentity {
            uid,
            email: info.email,
            email_verified: info.email_verified,
            display_name: info.display_name,
            disabled: info.disabled,
        })
    }
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountInfo>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Maps an Identity Toolkit error message such as `EMAIL_EXISTS` or
/// `WEAK_PASSWORD : Password should be at least 6 characters`.
fn classify_error(message: &str) -> AuthError {
    let code = message.split(':').next().unwrap_or(message).trim();
    match code {
        "EMAIL_EXISTS" | "DUPLICATE_EMAIL" => AuthError::EmailExists,
        "USER_NOT_FOUND" => AuthError::UserNotFound,
        "INVALID_EMAIL" | "WEAK_PASSWORD" | "INVALID_PASSWORD" | "MISSING_PASSWORD" => {
            AuthError::Rejected(message.to_string())
        }
        _ => AuthError::service_unavailable(message.to_string()),
    }
}

/// Identity Toolkit admin client for one Firebase project.
pub struct FirebaseAdminClient {
    project_id: String,
    base_url: String,
    token_uri: String,
    emulated: bool,
    service_account: Option<ServiceAccount>,
    http_client: reqwest::Client,
    access_token: Arc<RwLock<Option<CachedAccessToken>>>,
}

impl FirebaseAdminClient {
    pub fn new(config: &FirebaseConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("HTTP client: {}", e)))?;

        let service_account = match (&config.client_email, config.private_key_pem()) {
            (Some(client_email), Some(pem)) => Some(ServiceAccount {
                client_email: client_email.clone(),
                key: EncodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
                    AuthError::service_unavailable(format!("Invalid service-account key: {}", e))
                })?,
            }),
            _ => None,
        };

        Ok(Self {
            project_id: config.project_id.clone(),
            base_url: config.admin_base_url(),
            token_uri: config.token_uri.clone(),
            emulated: config.emulator_host.is_some(),
            service_account,
            http_client,
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    fn service_account(&self) -> Result<&ServiceAccount, AuthError> {
        self.service_account
            .as_ref()
            .ok_or_else(|| AuthError::service_unavailable("Service account is not configured"))
    }

    fn accounts_url(&self, action: &str) -> String {
        format!(
            "{}/v1/projects/{}/accounts{}",
            self.base_url, self.project_id, action
        )
    }

    async fn fetch_access_token(&self) -> Result<CachedAccessToken, AuthError> {
        let account = self.service_account()?;
        let iat = Utc::now().timestamp();
        let assertion = encode(
            &Header::new(Algorithm::RS256),
            &GrantAssertion {
                iss: &account.client_email,
                scope: OAUTH_SCOPES,
                aud: &self.token_uri,
                iat,
                exp: iat + TOKEN_LIFETIME_SECS,
            },
            &account.key,
        )
        .map_err(|e| AuthError::service_unavailable(format!("Failed to sign assertion: {}", e)))?;

        let response = self
            .http_client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "OAuth token request failed");
                AuthError::service_unavailable(format!("Token request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, "OAuth token endpoint returned an error");
            return Err(AuthError::service_unavailable(format!(
                "Token endpoint returned {}",
                status
            )));
        }

        let body: AccessTokenResponse = response.json().await.map_err(|e| {
            AuthError::service_unavailable(format!("Failed to parse token response: {}", e))
        })?;

        Ok(CachedAccessToken {
            token: body.access_token,
            expires_at: Instant::now() + Duration::from_secs(body.expires_in),
        })
    }

    async fn bearer(&self) -> Result<String, AuthError> {
        if self.emulated {
            return Ok("owner".to_string());
        }

        {
            let cache = self.access_token.read().await;
            if let Some(ref cached) = *cache {
                if cached.is_fresh() {
                    return Ok(cached.token.clone());
                }
            }
        }

        let fresh = self.fetch_access_token().await?;
        let token = fresh.token.clone();
        *self.access_token.write().await = Some(fresh);
        Ok(token)
    }

    /// POSTs `body` to an accounts endpoint and decodes the reply.
    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> Result<T, AuthError> {
        let url = self.accounts_url(action);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.bearer().await?)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, %url, "Identity Toolkit request failed");
                AuthError::service_unavailable(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .map(|env| env.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            let error = classify_error(&message);
            if matches!(error, AuthError::ServiceUnavailable(_)) {
                tracing::error!(%status, %message, "Identity Toolkit returned an error");
            } else {
                tracing::debug!(%status, %message, "Identity Toolkit rejected request");
            }
            return Err(error);
        }

        response.json::<T>().await.map_err(|e| {
            AuthError::service_unavailable(format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAdminClient {
    async fn get_user(&self, uid: &FirebaseUid) -> Result<RemoteIdentity, AuthError> {
        let response: LookupResponse = self
            .call(":lookup", json!({ "localId": [uid.as_str()] }))
            .await?;

        response
            .users
            .into_iter()
            .next()
            .ok_or(AuthError::UserNotFound)?
            .try_into()
    }

    async fn create_user(&self, request: &NewRemoteIdentity) -> Result<RemoteIdentity, AuthError> {
        let mut body = json!({
            "email": request.email,
            "password": request.password,
        });
        if let Some(ref name) = request.display_name {
            body["displayName"] = json!(name);
        }

        let info: AccountInfo = self.call("", body).await?;
        tracing::info!(uid = %info.local_id, "Created remote identity");
        info.try_into()
    }

    async fn delete_user(&self, uid: &FirebaseUid) -> Result<(), AuthError> {
        let _: serde_json::Value = self
            .call(":delete", json!({ "localId": uid.as_str() }))
            .await?;
        tracing::info!(%uid, "Deleted remote identity");
        Ok(())
    }

    async fn create_custom_token(&self, uid: &FirebaseUid) -> Result<String, AuthError> {
        let account = self.service_account()?;
        let iat = Utc::now().timestamp();
        let claims = CustomTokenClaims {
            iss: &account.client_email,
            sub: &account.client_email,
            aud: CUSTOM_TOKEN_AUDIENCE,
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
            uid: uid.as_str(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &account.key)
            .map_err(|e| AuthError::service_unavailable(format!("Failed to sign custom token: {}", e)))
    }
}

impl std::fmt::Debug for FirebaseAdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseAdminClient")
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .field("emulated", &self.emulated)
            .finish_non_exhaustive()
    }
}
