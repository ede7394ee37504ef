//! PostgreSQL implementation of ProfileRepository.
//!
//! Account edits touch both `users` and `profiles` and run in one
//! transaction; the transaction rolls back when dropped uncommitted.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use super::{db_error, violates};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{AccountDetails, Profile, ProfileDetails};
use crate::ports::ProfileRepository;

#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    id_user: i64,
    first_name: String,
    last_name: String,
    display_name: Option<String>,
    phone_number: Option<String>,
    bio: Option<String>,
    gender: Option<String>,
    email: Option<String>,
    id_school_number: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            user_id: UserId::from_db(row.id_user),
            first_name: row.first_name,
            last_name: row.last_name,
            display_name: row.display_name,
            phone_number: row.phone_number,
            bio: row.bio,
            gender: row.gender,
            email: row.email,
            id_school_number: row.id_school_number,
        }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.id_user, p.first_name, p.last_name, p.display_name,
                   p.phone_number, p.bio, p.gender, u.email, u.id_school_number
            FROM profiles p
            LEFT JOIN users u ON u.id = p.id_user
            WHERE p.id_user = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch profile", e))?;

        Ok(row.map(Profile::from))
    }

    async fn update_details(
        &self,
        user_id: UserId,
        details: &ProfileDetails,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET display_name = $2, bio = $3, updated_at = NOW()
            WHERE id_user = $1
            "#,
        )
        .bind(user_id.value())
        .bind(&details.display_name)
        .bind(&details.bio)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update profile", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_account(
        &self,
        user_id: UserId,
        account: &AccountDetails,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("start transaction", e))?;

        let users = sqlx::query("UPDATE users SET email = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id.value())
            .bind(&account.email)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if violates(&e, "users_email_key") {
                    return DomainError::conflict("A user with this email already exists");
                }
                db_error("update user email", e)
            })?;
        if users.rows_affected() == 0 {
            return Err(DomainError::not_found("User not found"));
        }

        let profiles = sqlx::query(
            r#"
            UPDATE profiles
            SET phone_number = $2, gender = $3, updated_at = NOW()
            WHERE id_user = $1
            "#,
        )
        .bind(user_id.value())
        .bind(&account.phone_number)
        .bind(&account.gender)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            warn!(user_id = %user_id, error = %e, "Account update rolled back");
            db_error("update profile account fields", e)
        })?;
        if profiles.rows_affected() == 0 {
            return Err(DomainError::not_found("Profile not found"));
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))
    }
}
