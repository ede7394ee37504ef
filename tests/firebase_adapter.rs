//! Firebase adapters against a local HTTP double.
//!
//! The signing key in `fixtures/test_rsa.pem` matches `fixtures/jwks.json`,
//! so tokens minted here verify exactly as Google-issued ones would.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::SecretString;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orgdesk::adapters::auth::{FirebaseAdminClient, FirebaseTokenVerifier};
use orgdesk::config::FirebaseConfig;
use orgdesk::domain::foundation::{AuthError, FirebaseUid, NewRemoteIdentity};
use orgdesk::ports::{IdentityProvider, TokenVerifier};

const PROJECT: &str = "org-portal";
const KID: &str = "test-key-1";
const PRIVATE_KEY: &str = include_str!("fixtures/test_rsa.pem");
const JWKS: &str = include_str!("fixtures/jwks.json");

fn jwks() -> Value {
    serde_json::from_str(JWKS).unwrap()
}

fn sign(kid: &str, claims: Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
    encode(&header, &claims, &key).unwrap()
}

fn id_token_claims(uid: &str) -> Value {
    let now = Utc::now().timestamp();
    json!({
        "iss": format!("https://securetoken.google.com/{}", PROJECT),
        "aud": PROJECT,
        "sub": uid,
        "iat": now - 30,
        "exp": now + 3600,
        "email": "ada@example.edu",
        "email_verified": true,
        "firebase": { "sign_in_provider": "password" }
    })
}

async fn verifier_for(server: &MockServer) -> FirebaseTokenVerifier {
    let config = FirebaseConfig {
        project_id: PROJECT.into(),
        jwks_url: format!("{}/jwks", server.uri()),
        ..Default::default()
    };
    FirebaseTokenVerifier::new(&config).unwrap()
}

async fn serve_jwks(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/jwks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jwks()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn emulator_client(server: &MockServer) -> FirebaseAdminClient {
    let config = FirebaseConfig {
        project_id: PROJECT.into(),
        emulator_host: Some(server.address().to_string()),
        ..Default::default()
    };
    FirebaseAdminClient::new(&config).unwrap()
}

fn accounts_path(action: &str) -> String {
    format!(
        "/identitytoolkit.googleapis.com/v1/projects/{}/accounts{}",
        PROJECT, action
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Token Verification
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn valid_token_verifies_and_keeps_claims() {
    let server = MockServer::start().await;
    serve_jwks(&server, 1).await;
    let verifier = verifier_for(&server).await;

    let user = verifier
        .verify(&sign(KID, id_token_claims("uid-ada")))
        .await
        .unwrap();

    assert_eq!(user.uid.as_str(), "uid-ada");
    assert_eq!(user.email.as_deref(), Some("ada@example.edu"));
    assert!(user.email_verified);
    assert_eq!(user.claims["firebase"]["sign_in_provider"], "password");
}

#[tokio::test]
async fn signing_keys_are_cached_between_verifications() {
    let server = MockServer::start().await;
    serve_jwks(&server, 1).await;
    let verifier = verifier_for(&server).await;

    for uid in ["uid-1", "uid-2", "uid-3"] {
        verifier.verify(&sign(KID, id_token_claims(uid))).await.unwrap();
    }
}

#[tokio::test]
async fn expired_token_is_reported_as_expired() {
    let server = MockServer::start().await;
    serve_jwks(&server, 1).await;
    let verifier = verifier_for(&server).await;

    let mut claims = id_token_claims("uid-ada");
    let now = Utc::now().timestamp();
    claims["iat"] = json!(now - 7200);
    claims["exp"] = json!(now - 3600);

    let err = verifier.verify(&sign(KID, claims)).await.unwrap_err();

    assert_eq!(err, AuthError::TokenExpired);
}

#[tokio::test]
async fn token_for_another_project_is_rejected() {
    let server = MockServer::start().await;
    serve_jwks(&server, 1).await;
    let verifier = verifier_for(&server).await;

    let mut claims = id_token_claims("uid-ada");
    claims["aud"] = json!("someone-else");
    claims["iss"] = json!("https://securetoken.google.com/someone-else");

    let err = verifier.verify(&sign(KID, claims)).await.unwrap_err();

    assert_eq!(err, AuthError::InvalidToken);
}

#[tokio::test]
async fn unknown_key_id_soon_after_fetch_is_rejected_from_cache() {
    let server = MockServer::start().await;
    serve_jwks(&server, 1).await;
    let verifier = verifier_for(&server).await;

    verifier
        .verify(&sign(KID, id_token_claims("uid-ada")))
        .await
        .unwrap();
    let err = verifier
        .verify(&sign("rotated-key", id_token_claims("uid-ada")))
        .await
        .unwrap_err();

    assert_eq!(err, AuthError::InvalidToken);
}

#[tokio::test]
async fn unknown_key_ids_first_fetch_then_reject_from_cache() {
    let server = MockServer::start().await;
    serve_jwks(&server, 1).await;
    let verifier = verifier_for(&server).await;

    let err = verifier
        .verify(&sign("bogus-first", id_token_claims("uid-ada")))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::InvalidToken);

    verifier
        .verify(&sign(KID, id_token_claims("uid-ada")))
        .await
        .unwrap();
    for n in 0..20 {
        let err = verifier
            .verify(&sign(&format!("bogus-{}", n), id_token_claims("uid-ada")))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }
}

#[tokio::test]
async fn emulator_mode_still_rejects_unsigned_tokens() {
    let server = MockServer::start().await;
    serve_jwks(&server, 0).await;
    let config = FirebaseConfig {
        project_id: PROJECT.into(),
        emulator_host: Some(server.address().to_string()),
        jwks_url: format!("{}/jwks", server.uri()),
        ..Default::default()
    };
    let verifier = FirebaseTokenVerifier::new(&config).unwrap();
    // {"alg":"none","typ":"JWT"} with project claims and an empty signature
    let unsigned = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
        eyJpc3MiOiJodHRwczovL3NlY3VyZXRva2VuLmdvb2dsZS5jb20vb3JnLXBvcnRhbCIsImF1ZCI6Im9yZy1wb3J0YWwiLCJzdWIiOiJ1aWQtZW11bGF0ZWQiLCJpYXQiOjE3MDAwMDAwMDAsImV4cCI6NDEwMjQ0NDgwMH0.";

    let err = verifier.verify(unsigned).await.unwrap_err();

    assert_eq!(err, AuthError::InvalidToken);
}

#[tokio::test]
async fn tampered_signature_is_rejected() {
    let server = MockServer::start().await;
    serve_jwks(&server, 1).await;
    let verifier = verifier_for(&server).await;

    let token = sign(KID, id_token_claims("uid-ada"));
    let (unsigned, _) = token.rsplit_once('.').unwrap();
    let forged = format!("{}.c2lnbmF0dXJl", unsigned);

    let err = verifier.verify(&forged).await.unwrap_err();

    assert_eq!(err, AuthError::InvalidToken);
}

#[tokio::test]
async fn unreachable_key_endpoint_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jwks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let verifier = verifier_for(&server).await;

    let err = verifier
        .verify(&sign(KID, id_token_claims("uid-ada")))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::ServiceUnavailable(_)));
}

// ════════════════════════════════════════════════════════════════════════════
// Account Administration (emulator)
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn lookup_maps_account_info() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(accounts_path(":lookup")))
        .and(header("authorization", "Bearer owner"))
        .and(body_partial_json(json!({ "localId": ["uid-ada"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{
                "localId": "uid-ada",
                "email": "ada@example.edu",
                "emailVerified": true,
                "displayName": "Ada Lovelace"
            }]
        })))
        .mount(&server)
        .await;

    let remote = emulator_client(&server)
        .get_user(&FirebaseUid::new("uid-ada").unwrap())
        .await
        .unwrap();

    assert_eq!(remote.email.as_deref(), Some("ada@example.edu"));
    assert!(remote.email_verified);
    assert_eq!(remote.display_name.as_deref(), Some("Ada Lovelace"));
    assert!(!remote.disabled);
}

#[tokio::test]
async fn lookup_without_users_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(accounts_path(":lookup")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = emulator_client(&server)
        .get_user(&FirebaseUid::new("uid-ghost").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err, AuthError::UserNotFound);
}

#[tokio::test]
async fn create_user_sends_display_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(accounts_path("")))
        .and(body_partial_json(json!({
            "email": "grace@example.edu",
            "displayName": "Grace Hopper"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localId": "uid-grace",
            "email": "grace@example.edu"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let remote = emulator_client(&server)
        .create_user(&NewRemoteIdentity {
            email: "grace@example.edu".into(),
            password: "compilers!".into(),
            display_name: Some("Grace Hopper".into()),
        })
        .await
        .unwrap();

    assert_eq!(remote.uid.as_str(), "uid-grace");
    assert!(!remote.email_verified);
}

#[tokio::test]
async fn duplicate_email_maps_to_email_exists() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(accounts_path("")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "EMAIL_EXISTS" }
        })))
        .mount(&server)
        .await;

    let err = emulator_client(&server)
        .create_user(&NewRemoteIdentity {
            email: "grace@example.edu".into(),
            password: "compilers!".into(),
            display_name: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err, AuthError::EmailExists);
}

#[tokio::test]
async fn delete_user_posts_local_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(accounts_path(":delete")))
        .and(body_partial_json(json!({ "localId": "uid-grace" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    emulator_client(&server)
        .delete_user(&FirebaseUid::new("uid-grace").unwrap())
        .await
        .unwrap();
}

// ════════════════════════════════════════════════════════════════════════════
// Service Account
// ════════════════════════════════════════════════════════════════════════════

fn service_account_client(server: &MockServer) -> FirebaseAdminClient {
    let config = FirebaseConfig {
        project_id: PROJECT.into(),
        client_email: Some("admin@org-portal.iam.gserviceaccount.com".into()),
        private_key: Some(SecretString::new(PRIVATE_KEY.to_string())),
        token_uri: format!("{}/token", server.uri()),
        identity_toolkit_url: server.uri(),
        ..Default::default()
    };
    FirebaseAdminClient::new(&config).unwrap()
}

#[tokio::test]
async fn access_token_is_fetched_once_and_reused() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.test",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/projects/{}/accounts:delete", PROJECT)))
        .and(header("authorization", "Bearer ya29.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let client = service_account_client(&server);
    for uid in ["uid-1", "uid-2"] {
        client
            .delete_user(&FirebaseUid::new(uid).unwrap())
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn custom_token_carries_uid_claim() {
    let server = MockServer::start().await;
    let client = service_account_client(&server);

    let token = client
        .create_custom_token(&FirebaseUid::new("uid-grace").unwrap())
        .await
        .unwrap();

    let set: jsonwebtoken::jwk::JwkSet = serde_json::from_str(JWKS).unwrap();
    let key = DecodingKey::from_jwk(set.find(KID).unwrap()).unwrap();
    let mut validation = Validation::new(Algorithm::RS256);
    validation.validate_aud = false;
    let claims = decode::<Value>(&token, &key, &validation).unwrap().claims;

    assert_eq!(claims["uid"], "uid-grace");
    assert_eq!(claims["iss"], "admin@org-portal.iam.gserviceaccount.com");
}
