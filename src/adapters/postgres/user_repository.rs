//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{db_error, violates};
use crate::domain::foundation::{
    DomainError, FirebaseUid, Page, PageRequest, Timestamp, UserId,
};
use crate::domain::user::{NewUser, Role, User};
use crate::ports::UserRepository;

const USER_COLUMNS: &str = r#"
    id, name_first, name_last, name, email, email_verified_at, firebase_uid,
    id_school_number, role, created_at, updated_at
"#;

/// PostgreSQL implementation of the UserRepository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, clause: &str, bind: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {} LIMIT 1", USER_COLUMNS, clause);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch user", e))?;

        row.map(User::try_from).transpose()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name_first: String,
    name_last: String,
    name: String,
    email: String,
    email_verified_at: Option<DateTime<Utc>>,
    firebase_uid: Option<String>,
    id_school_number: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid role value: {}", e)))?;
        let firebase_uid = row
            .firebase_uid
            .map(FirebaseUid::new)
            .transpose()
            .map_err(|e| DomainError::database(format!("Invalid firebase_uid: {}", e)))?;

        Ok(User {
            id: UserId::from_db(row.id),
            first_name: row.name_first,
            last_name: row.name_last,
            name: row.name,
            email: row.email,
            email_verified_at: row.email_verified_at.map(Timestamp::from_datetime),
            firebase_uid,
            id_school_number: row.id_school_number,
            role,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn map_insert_error(err: sqlx::Error) -> DomainError {
    if violates(&err, "users_email_key") {
        return DomainError::conflict("A user with this email already exists");
    }
    if violates(&err, "users_firebase_uid_key") {
        return DomainError::conflict("User already exists");
    }
    db_error("insert user", err)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_with_profile(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("start transaction", e))?;

        let verified_at = user.email_verified.then(Utc::now);
        let sql = format!(
            r#"
            INSERT INTO users (
                name_first, name_last, email, email_verified_at, firebase_uid,
                id_school_number, role, password
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let row: UserRow = sqlx::query_as(&sql)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(verified_at)
            .bind(user.firebase_uid.as_ref().map(FirebaseUid::as_str))
            .bind(&user.id_school_number)
            .bind(user.role.as_str())
            .bind(&user.password_hash)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_insert_error)?;

        sqlx::query(
            r#"
            INSERT INTO profiles (id_user, first_name, last_name)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(row.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("insert profile", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;

        User::try_from(row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch user", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_firebase_uid(&self, uid: &FirebaseUid) -> Result<Option<User>, DomainError> {
        self.find_one("firebase_uid = $1", uid.as_str()).await
    }

    async fn find_by_school_id(&self, id_school_number: &str) -> Result<Option<User>, DomainError> {
        self.find_one("id_school_number = $1", id_school_number).await
    }

    async fn list_students(&self, page: PageRequest) -> Result<Page<User>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'user'")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count users", e))?;

        let sql = format!(
            r#"
            SELECT {} FROM users
            WHERE role = 'user'
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
            USER_COLUMNS
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .bind(page.limit() as i64)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list users", e))?;

        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(users, page, total))
    }

    async fn find_password_hash(&self, id: UserId) -> Result<Option<String>, DomainError> {
        let hash: Option<Option<String>> =
            sqlx::query_scalar("SELECT password FROM users WHERE id = $1")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("fetch password", e))?;

        Ok(hash.flatten())
    }

    async fn update_password_hash(&self, id: UserId, hash: &str) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET password = $2, updated_at = NOW() WHERE id = $1")
            .bind(id.value())
            .bind(hash)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("update password", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User not found"));
        }
        Ok(())
    }
}
