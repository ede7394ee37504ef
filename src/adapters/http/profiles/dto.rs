//! Request and response bodies for `/api/profiles`.

use serde::{Deserialize, Serialize};

use crate::adapters::http::extract::lenient;
use crate::domain::user::Profile;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub id_profile: i64,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub id_school_number: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub gender: Option<String>,
}

impl From<Profile> for ProfileView {
    fn from(p: Profile) -> Self {
        Self {
            id_profile: p.id,
            first_name: p.first_name,
            last_name: p.last_name,
            display_name: p.display_name,
            email: p.email,
            id_school_number: p.id_school_number,
            phone_number: p.phone_number,
            bio: p.bio,
            gender: p.gender,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "userProfile")]
    pub user_profile: ProfileView,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
