//! PostgreSQL implementation of EventRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;

use super::{db_error, violates};
use crate::domain::event::{Event, EventStatus, NewEvent, Registration, RegistrationKey};
use crate::domain::foundation::{
    DomainError, EventId, MemberId, RegistrationId, Timestamp,
};
use crate::ports::EventRepository;

const EVENT_COLUMNS: &str = r#"
    id, name, description, venue, event_date, time_from, time_to,
    registration_start, registration_end, max_participants, status,
    created_at, updated_at
"#;

#[derive(Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: i64,
    name: String,
    description: String,
    venue: String,
    event_date: NaiveDate,
    time_from: NaiveTime,
    time_to: NaiveTime,
    registration_start: Option<NaiveDate>,
    registration_end: Option<NaiveDate>,
    max_participants: Option<i32>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = DomainError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let status: EventStatus = row
            .status
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid event status: {}", e)))?;

        Ok(Event {
            id: EventId::from_db(row.id),
            name: row.name,
            description: row.description,
            venue: row.venue,
            event_date: row.event_date,
            time_from: row.time_from,
            time_to: row.time_to,
            registration_start: row.registration_start,
            registration_end: row.registration_end,
            max_participants: row.max_participants,
            status,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RegistrationRow {
    id: i64,
    event_id: i64,
    member_id: i64,
    registered_at: DateTime<Utc>,
}

impl From<RegistrationRow> for Registration {
    fn from(row: RegistrationRow) -> Self {
        Registration {
            id: RegistrationId::from_db(row.id),
            event_id: EventId::from_db(row.event_id),
            member_id: MemberId::from_db(row.member_id),
            registered_at: Timestamp::from_datetime(row.registered_at),
        }
    }
}

/// First day of the month and first day of the following month.
fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), DomainError> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::internal(format!("Invalid month {}-{}", year, month)))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| DomainError::internal(format!("Invalid month {}-{}", year, month)))?;
    Ok((start, end))
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn create(&self, event: &NewEvent) -> Result<Event, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO events (
                name, description, venue, event_date, time_from, time_to,
                registration_start, registration_end, max_participants, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        );
        let row: EventRow = sqlx::query_as(&sql)
            .bind(&event.name)
            .bind(&event.description)
            .bind(&event.venue)
            .bind(event.event_date)
            .bind(event.time_from)
            .bind(event.time_to)
            .bind(event.registration_start)
            .bind(event.registration_end)
            .bind(event.max_participants)
            .bind(event.status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("insert event", e))?;

        Event::try_from(row)
    }

    async fn exists(&self, id: EventId) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("check event", e))
    }

    async fn list_in_month(&self, year: i32, month: u32) -> Result<Vec<Event>, DomainError> {
        let (start, end) = month_bounds(year, month)?;
        let sql = format!(
            r#"
            SELECT {} FROM events
            WHERE event_date >= $1 AND event_date < $2
            ORDER BY event_date ASC, time_from ASC, id ASC
            "#,
            EVENT_COLUMNS
        );
        let rows: Vec<EventRow> = sqlx::query_as(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list events", e))?;

        rows.into_iter().map(Event::try_from).collect()
    }

    async fn find_registration(
        &self,
        key: RegistrationKey,
    ) -> Result<Option<Registration>, DomainError> {
        let row: Option<RegistrationRow> = sqlx::query_as(
            r#"
            SELECT id, event_id, member_id, registered_at
            FROM event_registrations
            WHERE event_id = $1 AND member_id = $2
            "#,
        )
        .bind(key.event_id.value())
        .bind(key.member_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch registration", e))?;

        Ok(row.map(Registration::from))
    }

    async fn register(&self, key: RegistrationKey) -> Result<Registration, DomainError> {
        let row: RegistrationRow = sqlx::query_as(
            r#"
            INSERT INTO event_registrations (event_id, member_id)
            VALUES ($1, $2)
            RETURNING id, event_id, member_id, registered_at
            "#,
        )
        .bind(key.event_id.value())
        .bind(key.member_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "event_registrations_event_member_key") {
                return DomainError::conflict("This member is already registered for this event");
            }
            db_error("insert registration", e)
        })?;

        Ok(Registration::from(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_covers_whole_month() {
        let (start, end) = month_bounds(2024, 2).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn month_bounds_rolls_over_december() {
        let (start, end) = month_bounds(2024, 12).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn month_bounds_rejects_month_zero() {
        assert!(month_bounds(2024, 0).is_err());
    }
}
