//! PostgreSQL implementation of RequirementRepository.
//!
//! Listing is split into a count, a page fetch and one grouped count over
//! `requirements_compliance` for the requirements on that page.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use super::db_error;
use crate::domain::foundation::{DomainError, MemberId, PageRequest, RequirementId, Timestamp};
use crate::domain::requirement::{
    ComplianceRecord, ComplianceStatus, NewRequirement, Requirement, RequirementChanges,
    RequirementStatus, StatusCount,
};
use crate::ports::RequirementRepository;

const REQUIREMENT_COLUMNS: &str =
    "id, name, description, status, requirement_date, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresRequirementRepository {
    pool: PgPool,
}

impl PostgresRequirementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RequirementRow {
    id: i64,
    name: String,
    description: Option<String>,
    status: String,
    requirement_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RequirementRow> for Requirement {
    type Error = DomainError;

    fn try_from(row: RequirementRow) -> Result<Self, Self::Error> {
        let status: RequirementStatus = row
            .status
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid requirement status: {}", e)))?;

        Ok(Requirement {
            id: RequirementId::from_db(row.id),
            name: row.name,
            description: row.description,
            status,
            requirement_date: row.requirement_date,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ComplianceRow {
    id: i64,
    requirement_id: i64,
    member_id: i64,
    compliance_status: String,
    submitted_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct CountRow {
    requirement_id: i64,
    compliance_status: String,
    count: i64,
}

#[async_trait]
impl RequirementRepository for PostgresRequirementRepository {
    async fn create(&self, requirement: &NewRequirement) -> Result<Requirement, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO requirements (name, description, status, requirement_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            REQUIREMENT_COLUMNS
        );
        let row: RequirementRow = sqlx::query_as(&sql)
            .bind(&requirement.name)
            .bind(&requirement.description)
            .bind(requirement.status.as_str())
            .bind(requirement.requirement_date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("insert requirement", e))?;

        Requirement::try_from(row)
    }

    async fn find_by_id(&self, id: RequirementId) -> Result<Option<Requirement>, DomainError> {
        let sql = format!(
            "SELECT {} FROM requirements WHERE id = $1",
            REQUIREMENT_COLUMNS
        );
        let row: Option<RequirementRow> = sqlx::query_as(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch requirement", e))?;

        row.map(Requirement::try_from).transpose()
    }

    async fn update(
        &self,
        id: RequirementId,
        changes: &RequirementChanges,
    ) -> Result<Option<Requirement>, DomainError> {
        // Absent fields keep their stored value; updated_at always moves.
        let sql = format!(
            r#"
            UPDATE requirements SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                requirement_date = COALESCE($5, requirement_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            REQUIREMENT_COLUMNS
        );
        let row: Option<RequirementRow> = sqlx::query_as(&sql)
            .bind(id.value())
            .bind(&changes.name)
            .bind(&changes.description)
            .bind(changes.status.map(|s| s.as_str()))
            .bind(changes.requirement_date)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("update requirement", e))?;

        row.map(Requirement::try_from).transpose()
    }

    async fn archive(&self, id: RequirementId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE requirements SET status = 'archived', updated_at = NOW() WHERE id = $1",
        )
        .bind(id.value())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("archive requirement", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, status: Option<RequirementStatus>) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM requirements WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("count requirements", e))
    }

    async fn list(
        &self,
        status: Option<RequirementStatus>,
        page: PageRequest,
    ) -> Result<Vec<Requirement>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM requirements
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY requirement_date ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
            REQUIREMENT_COLUMNS
        );
        let rows: Vec<RequirementRow> = sqlx::query_as(&sql)
            .bind(status.map(|s| s.as_str()))
            .bind(page.limit() as i64)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list requirements", e))?;

        rows.into_iter().map(Requirement::try_from).collect()
    }

    async fn compliance_counts(
        &self,
        ids: &[RequirementId],
    ) -> Result<Vec<StatusCount>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().map(RequirementId::value).collect();

        let rows: Vec<CountRow> = sqlx::query_as(
            r#"
            SELECT requirement_id, compliance_status, COUNT(*) AS count
            FROM requirements_compliance
            WHERE requirement_id = ANY($1)
            GROUP BY requirement_id, compliance_status
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("count compliance records", e))?;

        Ok(rows
            .into_iter()
            .map(|row| StatusCount {
                requirement_id: RequirementId::from_db(row.requirement_id),
                status: row.compliance_status,
                count: row.count,
            })
            .collect())
    }

    async fn record_compliance(
        &self,
        requirement_id: RequirementId,
        member_id: MemberId,
        status: ComplianceStatus,
    ) -> Result<ComplianceRecord, DomainError> {
        let row: ComplianceRow = sqlx::query_as(
            r#"
            INSERT INTO requirements_compliance (requirement_id, member_id, compliance_status)
            VALUES ($1, $2, $3)
            ON CONFLICT (requirement_id, member_id) DO UPDATE SET
                compliance_status = EXCLUDED.compliance_status,
                submitted_at = NOW(),
                updated_at = NOW()
            RETURNING id, requirement_id, member_id, compliance_status, submitted_at, updated_at
            "#,
        )
        .bind(requirement_id.value())
        .bind(member_id.value())
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                DomainError::not_found("Requirement or member not found")
            }
            e => db_error("record compliance", e),
        })?;

        let status = row
            .compliance_status
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid compliance status: {}", e)))?;

        Ok(ComplianceRecord {
            id: row.id,
            requirement_id: RequirementId::from_db(row.requirement_id),
            member_id: MemberId::from_db(row.member_id),
            status,
            submitted_at: Timestamp::from_datetime(row.submitted_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}
