//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - Users, inserted together with their profile
//! - `PostgresProfileRepository` - Profile reads and edits
//! - `PostgresMemberRepository` - Member records joined with programs
//! - `PostgresEventRepository` - Events and event registrations
//! - `PostgresRequirementRepository` - Requirements and compliance tallies

mod event_repository;
mod member_repository;
mod profile_repository;
mod requirement_repository;
mod user_repository;

pub use event_repository::PostgresEventRepository;
pub use member_repository::PostgresMemberRepository;
pub use profile_repository::PostgresProfileRepository;
pub use requirement_repository::PostgresRequirementRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::PgPool;

use crate::domain::foundation::DomainError;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Applies pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
}

/// Wraps a sqlx error with what was being attempted.
pub(crate) fn db_error(action: &str, err: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to {}: {}", action, err))
}

/// True when `err` violates the named unique constraint.
pub(crate) fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
