//! Local password hashing with Argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use tracing::{debug, warn};

use crate::domain::foundation::DomainError;

/// Minimum length for a new local password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password policy applied to new passwords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            max_length: 128,
        }
    }
}

impl PasswordPolicy {
    pub fn validate(&self, password: &str) -> Result<(), Vec<String>> {
        let len = password.chars().count();
        let mut errors = Vec::new();

        if len < self.min_length {
            errors.push(format!(
                "Password must be at least {} characters",
                self.min_length
            ));
        }
        if len > self.max_length {
            errors.push(format!(
                "Password must be at most {} characters",
                self.max_length
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Hashes and verifies local passwords as PHC strings.
pub struct PasswordService {
    argon2: Argon2<'static>,
    policy: PasswordPolicy,
}

impl PasswordService {
    pub fn new(policy: PasswordPolicy) -> Self {
        Self::with_params(policy, Params::default())
    }

    /// Uses explicit Argon2 cost parameters. Tests pass cheap ones.
    pub fn with_params(policy: PasswordPolicy, params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            policy,
        }
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Hashes a password after checking it against the policy.
    pub fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        if let Err(errors) = self.policy.validate(password) {
            return Err(DomainError::validation("Validation failed", errors));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))?;

        Ok(hash.to_string())
    }

    /// Returns `Ok(false)` on a mismatch; errors only for unreadable hashes.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DomainError::internal(format!("Invalid password hash format: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => {
                debug!("Password verification succeeded");
                Ok(true)
            }
            Err(argon2::password_hash::Error::Password) => {
                warn!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => Err(DomainError::internal(format!(
                "Password verification error: {}",
                e
            ))),
        }
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(PasswordPolicy::default())
    }
}

impl std::fmt::Debug for PasswordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn fast_service() -> PasswordService {
        PasswordService::with_params(
            PasswordPolicy::default(),
            Params::new(4096, 1, 1, None).unwrap(),
        )
    }

    #[test]
    fn policy_enforces_minimum_length() {
        let policy = PasswordPolicy::default();
        assert!(policy.validate("1234567").is_err());
        assert!(policy.validate("12345678").is_ok());
    }

    #[test]
    fn hash_then_verify() {
        let service = fast_service();
        let hash = service.hash_password("correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify_password("correct horse", &hash).unwrap());
        assert!(!service.verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let service = fast_service();
        let a = service.hash_password("same password").unwrap();
        let b = service.hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn short_password_is_rejected_before_hashing() {
        let err = fast_service().hash_password("short").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.errors, vec!["Password must be at least 8 characters"]);
    }

    #[test]
    fn garbage_hash_is_an_internal_error() {
        let err = fast_service().verify_password("anything", "not-a-hash").unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
