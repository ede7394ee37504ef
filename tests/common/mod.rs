//! Shared fixtures: the full router over in-memory adapters.

#![allow(dead_code)]

use std::sync::Arc;

use argon2::Params;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use serde_json::Value;

use orgdesk::adapters::auth::{MockIdentityProvider, MockTokenVerifier};
use orgdesk::adapters::http::{app_router, AppState};
use orgdesk::adapters::memory::{
    InMemoryEventRepository, InMemoryMemberRepository, InMemoryRequirementRepository,
    InMemoryUserStore,
};
use orgdesk::config::ServerConfig;
use orgdesk::domain::foundation::{AuthenticatedUser, FirebaseUid, RemoteIdentity};
use orgdesk::domain::user::{NewUser, PasswordPolicy, PasswordService, Role, User};
use orgdesk::ports::UserRepository;

pub struct Harness {
    pub verifier: Arc<MockTokenVerifier>,
    pub identity: Arc<MockIdentityProvider>,
    pub users: InMemoryUserStore,
    pub members: InMemoryMemberRepository,
    pub events: InMemoryEventRepository,
    pub requirements: InMemoryRequirementRepository,
    pub app: Router,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(server: ServerConfig) -> Self {
        let verifier = Arc::new(MockTokenVerifier::new());
        let identity = Arc::new(MockIdentityProvider::new());
        let users = InMemoryUserStore::new();
        let members = InMemoryMemberRepository::new();
        let events = InMemoryEventRepository::new();
        let requirements = InMemoryRequirementRepository::new();

        let state = AppState {
            token_verifier: verifier.clone(),
            identity_provider: identity.clone(),
            users: Arc::new(users.clone()),
            profiles: Arc::new(users.clone()),
            members: Arc::new(members.clone()),
            events: Arc::new(events.clone()),
            requirements: Arc::new(requirements.clone()),
            passwords: Arc::new(PasswordService::with_params(
                PasswordPolicy::default(),
                Params::new(4096, 1, 1, None).unwrap(),
            )),
        };

        Self {
            app: app_router(state, &server),
            verifier,
            identity,
            users,
            members,
            events,
            requirements,
        }
    }

    /// Makes `token` verify as `uid` and registers the remote account.
    pub fn sign_in(&self, token: &str, uid: &str) {
        let uid = FirebaseUid::new(uid).unwrap();
        let email = Some(format!("{}@test.example.com", uid.as_str()));
        self.verifier.add_token(
            token,
            AuthenticatedUser::new(uid.clone(), email.clone(), true),
        );
        self.identity.add_user(RemoteIdentity {
            uid,
            email,
            email_verified: true,
            display_name: None,
            disabled: false,
        });
    }

    pub async fn seed_admin(&self, token: &str) -> User {
        let uid = format!("uid-{}", token);
        self.sign_in(token, &uid);
        self.users
            .create_with_profile(&NewUser {
                first_name: "Ada".into(),
                last_name: "Admin".into(),
                email: format!("{}@test.example.com", uid),
                email_verified: true,
                firebase_uid: Some(FirebaseUid::new(uid).unwrap()),
                id_school_number: None,
                role: Role::Admin,
                password_hash: None,
            })
            .await
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        use tower::ServiceExt;
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(request(Method::GET, uri, None, None)).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.send(request(Method::POST, uri, None, Some(body))).await
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
