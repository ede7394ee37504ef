//! User profiles and the edits clients may make to them.

use crate::domain::foundation::{is_valid_email, non_blank, DomainError, UserId};

/// A profile joined with the owning user's email and school ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: i64,
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub id_school_number: Option<String>,
}

/// Display fields edit. Both fields are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDetails {
    pub display_name: String,
    pub bio: String,
}

impl ProfileDetails {
    pub fn parse(display_name: Option<String>, bio: Option<String>) -> Result<Self, DomainError> {
        match (non_blank(display_name), non_blank(bio)) {
            (Some(display_name), Some(bio)) => Ok(Self { display_name, bio }),
            (display_name, bio) => {
                let mut missing = Vec::new();
                if display_name.is_none() {
                    missing.push("Display name is required".to_string());
                }
                if bio.is_none() {
                    missing.push("Bio is required".to_string());
                }
                Err(DomainError::missing_fields(missing))
            }
        }
    }
}

/// Account edit. The email lives on the user row, phone and gender on the
/// profile row; the two are written together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDetails {
    pub email: String,
    pub phone_number: String,
    pub gender: String,
}

impl AccountDetails {
    pub fn parse(
        email: Option<String>,
        phone_number: Option<String>,
        gender: Option<String>,
    ) -> Result<Self, DomainError> {
        let email = non_blank(email);
        let phone_number = non_blank(phone_number);
        let gender = non_blank(gender);

        let mut missing = Vec::new();
        if email.is_none() {
            missing.push("Email is required".to_string());
        }
        if phone_number.is_none() {
            missing.push("Phone number is required".to_string());
        }
        if gender.is_none() {
            missing.push("Gender is required".to_string());
        }

        let (Some(email), Some(phone_number), Some(gender)) = (email, phone_number, gender) else {
            return Err(DomainError::missing_fields(missing));
        };

        if !is_valid_email(&email) {
            return Err(DomainError::validation(
                "Validation failed",
                vec!["Email format is invalid".to_string()],
            ));
        }

        Ok(Self {
            email,
            phone_number,
            gender,
        })
    }
}
