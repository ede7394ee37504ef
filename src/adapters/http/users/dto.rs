//! Response bodies for `/api/users`.

use serde::Serialize;

use crate::domain::foundation::{PageInfo, Timestamp, UserId};
use crate::domain::user::{Role, User};

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<Timestamp>,
    pub id_school_number: Option<String>,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            email_verified_at: u.email_verified_at,
            id_school_number: u.id_school_number,
            role: u.role,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub message: String,
    pub users: Vec<UserView>,
    #[serde(rename = "totalCount")]
    pub total_count: i64,
    pub pagination: PageInfo,
}
