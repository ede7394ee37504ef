//! PostgreSQL implementation of MemberRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use super::{db_error, violates};
use crate::domain::foundation::{DomainError, MemberId, Page, PageRequest, Timestamp};
use crate::domain::member::{Member, MemberSummary, NewMember};
use crate::ports::MemberRepository;

const MEMBER_SELECT: &str = r#"
    SELECT m.id, m.first_name, m.last_name, m.suffix, m.id_school_number, m.email,
           m.birth_date, m.enrollment_date, m.program, p.name AS program_name,
           m.year, m.is_paid, m.created_at, m.updated_at
    FROM members m
    LEFT JOIN programs p ON p.code = m.program
"#;

#[derive(Clone)]
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, DomainError> {
        let sql = format!("{} WHERE m.id = $1", MEMBER_SELECT);
        let row: Option<MemberRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch member", e))?;

        Ok(row.map(Member::from))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: i64,
    first_name: String,
    last_name: String,
    suffix: Option<String>,
    id_school_number: String,
    email: Option<String>,
    birth_date: NaiveDate,
    enrollment_date: NaiveDate,
    program: String,
    program_name: Option<String>,
    year: i16,
    is_paid: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: MemberId::from_db(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            suffix: row.suffix,
            id_school_number: row.id_school_number,
            email: row.email,
            birth_date: row.birth_date,
            enrollment_date: row.enrollment_date,
            program: row.program,
            program_name: row.program_name,
            year: row.year,
            is_paid: row.is_paid,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    id_school_number: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn create(&self, member: &NewMember) -> Result<Member, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO members (
                first_name, last_name, suffix, id_school_number, email,
                birth_date, enrollment_date, program, year, is_paid
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.suffix)
        .bind(member.id_school_number.as_str())
        .bind(&member.email)
        .bind(member.birth_date)
        .bind(member.enrollment_date)
        .bind(member.program.code())
        .bind(member.year)
        .bind(member.is_paid)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "members_id_school_number_key") {
                return DomainError::conflict("This student ID is already registered as a member");
            }
            db_error("insert member", e)
        })?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::database("Inserted member could not be read back"))
    }

    async fn exists(&self, id: MemberId) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE id = $1)")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("check member", e))
    }

    async fn find_by_school_id(
        &self,
        id_school_number: &str,
    ) -> Result<Option<Member>, DomainError> {
        let sql = format!("{} WHERE m.id_school_number = $1", MEMBER_SELECT);
        let row: Option<MemberRow> = sqlx::query_as(&sql)
            .bind(id_school_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch member", e))?;

        Ok(row.map(Member::from))
    }

    async fn find_by_id_or_school_id(&self, key: &str) -> Result<Option<Member>, DomainError> {
        if let Ok(id) = key.parse::<MemberId>() {
            if let Some(member) = self.find_by_id(id.value()).await? {
                return Ok(Some(member));
            }
        }
        self.find_by_school_id(key).await
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Member>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count members", e))?;

        let sql = format!(
            "{} ORDER BY m.created_at DESC, m.id DESC LIMIT $1 OFFSET $2",
            MEMBER_SELECT
        );
        let rows: Vec<MemberRow> = sqlx::query_as(&sql)
            .bind(page.limit() as i64)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list members", e))?;

        Ok(Page::new(
            rows.into_iter().map(Member::from).collect(),
            page,
            total,
        ))
    }

    async fn list_summaries(&self) -> Result<Vec<MemberSummary>, DomainError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT id, id_school_number, first_name, last_name, email
            FROM members
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list members", e))?;

        Ok(rows
            .into_iter()
            .map(|row| MemberSummary {
                id: MemberId::from_db(row.id),
                id_school_number: row.id_school_number,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
            })
            .collect())
    }
}
