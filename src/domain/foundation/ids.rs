//! Strongly-typed identifier value objects.
//!
//! Rows are keyed by `BIGSERIAL` columns, so every identifier wraps a
//! positive `i64`. The provider-issued subject (`FirebaseUid`) is a string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier, rejecting zero and negative values.
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if value <= 0 {
                    return Err(ValidationError::invalid_format($field, "must be a positive integer"));
                }
                Ok(Self(value))
            }

            /// Wraps a value read back from the database.
            pub fn from_db(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw value for binding into queries.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ValidationError::invalid_format($field, "must be an integer"))?;
                Self::new(value)
            }
        }
    };
}

row_id!(
    /// Local user account identifier.
    UserId,
    "user_id"
);
row_id!(
    /// Member record identifier.
    MemberId,
    "member_id"
);
row_id!(
    /// Event identifier.
    EventId,
    "event_id"
);
row_id!(
    /// Event registration identifier.
    RegistrationId,
    "registration_id"
);
row_id!(
    /// Compliance requirement identifier.
    RequirementId,
    "requirement_id"
);

/// Subject identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FirebaseUid(String);

impl FirebaseUid {
    /// Creates a uid. Firebase uids are 1-128 characters.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("firebase_uid"));
        }
        if id.len() > 128 {
            return Err(ValidationError::invalid_format(
                "firebase_uid",
                "must be at most 128 characters",
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FirebaseUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Institutional (school) ID number. Canonical key for members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolIdNumber(String);

impl SchoolIdNumber {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ValidationError::empty_field("id_school_number"));
        }
        if id.len() > 50 {
            return Err(ValidationError::invalid_format(
                "id_school_number",
                "must be at most 50 characters",
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchoolIdNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
