//! Request and response bodies for `/api/auth`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::adapters::http::extract::lenient;
use crate::domain::foundation::{FirebaseUid, UserId};
use crate::domain::user::{Role, User};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyTokenRequest {
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Either `id_token` or `email` + `password` must be present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id_school_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogoutRequest {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdNumberQuery {
    #[serde(rename = "idNumber")]
    pub id_number: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// The local user as the identity endpoints present it.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub firebase_uid: Option<FirebaseUid>,
    pub email_verified: bool,
    pub role: Role,
    pub id_school_number: Option<String>,
}

impl AuthUserView {
    pub fn new(user: User, email_verified: bool) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            firebase_uid: user.firebase_uid,
            email_verified,
            role: user.role,
            id_school_number: user.id_school_number,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyTokenResponse {
    pub success: bool,
    pub message: String,
    pub user: AuthUserView,
    pub firebase_claims: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: AuthUserView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserByIdNumberView {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub id_number: Option<String>,
}

impl From<User> for UserByIdNumberView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            id_number: user.id_school_number,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserByIdNumberResponse {
    pub success: bool,
    pub data: UserByIdNumberView,
}
