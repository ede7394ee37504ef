//! Local user accounts.
//!
//! A user is the local mirror of an identity held by the identity provider,
//! linked through `firebase_uid`. Users and members are independent records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    is_valid_email, non_blank, DomainError, FirebaseUid, Timestamp, UserId, ValidationError,
};

/// Authorization role of a local user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// A persisted user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// `first_name last_name`, maintained by the store.
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<Timestamp>,
    pub firebase_uid: Option<FirebaseUid>,
    pub id_school_number: Option<String>,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Joins first and last name the way the `users.name` column does.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}

/// A user about to be inserted together with an empty profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub email_verified: bool,
    pub firebase_uid: Option<FirebaseUid>,
    pub id_school_number: Option<String>,
    pub role: Role,
    pub password_hash: Option<String>,
}

/// Personal details supplied with a registration request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrantDetails {
    pub first_name: String,
    pub last_name: String,
    pub id_school_number: Option<String>,
}

impl RegistrantDetails {
    /// Resolves names from the request. `name` stands in for `first_name`
    /// when the latter is absent.
    pub fn resolve(
        first_name: Option<String>,
        name: Option<String>,
        last_name: Option<String>,
        id_school_number: Option<String>,
    ) -> Self {
        Self {
            first_name: non_blank(first_name).or_else(|| non_blank(name)).unwrap_or_default(),
            last_name: non_blank(last_name).unwrap_or_default(),
            id_school_number: non_blank(id_school_number),
        }
    }

    pub fn into_new_user(
        self,
        email: String,
        email_verified: bool,
        firebase_uid: FirebaseUid,
        password_hash: Option<String>,
    ) -> NewUser {
        NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            email,
            email_verified,
            firebase_uid: Some(firebase_uid),
            id_school_number: self.id_school_number,
            role: Role::User,
            password_hash,
        }
    }
}

/// Validated credentials for a server-side sign-up.
#[derive(Debug, Clone)]
pub struct SignUpCredentials {
    pub email: String,
    pub password: String,
}

impl SignUpCredentials {
    pub fn parse(
        email: Option<String>,
        password: Option<String>,
        min_password_length: usize,
    ) -> Result<Self, DomainError> {
        let email = non_blank(email);
        let password = password.filter(|p| !p.is_empty());

        let mut missing = Vec::new();
        if email.is_none() {
            missing.push("Email is required".to_string());
        }
        if password.is_none() {
            missing.push("Password is required".to_string());
        }
        let (Some(email), Some(password)) = (email, password) else {
            return Err(DomainError::missing_fields(missing));
        };

        let mut errors = Vec::new();
        if !is_valid_email(&email) {
            errors.push("Email format is invalid".to_string());
        }
        if password.chars().count() < min_password_length {
            errors.push(format!(
                "Password must be at least {} characters",
                min_password_length
            ));
        }
        if !errors.is_empty() {
            return Err(DomainError::validation("Validation failed", errors));
        }

        Ok(Self { email, password })
    }
}
