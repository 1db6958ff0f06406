//! PostgreSQL implementation of SessionRepository and CapacityLedger.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, TemplateId, TimeRange, Timestamp, TrainerId,
};
use crate::domain::reservation::BookingError;
use crate::domain::session::{Session, SessionStatus};
use crate::ports::{CapacityLedger, OccupancyToken, SessionRepository};

use super::db_error;

/// PostgreSQL implementation of [`SessionRepository`] and
/// [`CapacityLedger`] over the `sessions` table.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Creates a new PostgresSessionStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionStore {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO sessions (
                id, trainer_id, source_template_id, date, start_time, end_time,
                capacity, confirmed_count, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.trainer_id().as_uuid())
        .bind(session.source_template_id().map(TemplateId::as_uuid))
        .bind(session.date())
        .bind(session.window().start())
        .bind(session.window().end())
        .bind(session.capacity() as i32)
        .bind(session.confirmed_count() as i32)
        .bind(session_status_to_str(session.status()))
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(DomainError::new(
                    ErrorCode::DuplicateSession,
                    format!(
                        "session for {} {} already exists",
                        session.date(),
                        session.window()
                    ),
                ))
            }
            Err(e) => Err(db_error("insert session", e)),
        }
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        // capacity may never drop below the stored counter, and a close
        // only lands while the counter is zero; re-checked here against
        // the ledger-owned value, not the aggregate snapshot
        let status = session_status_to_str(session.status());
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                capacity = $2,
                status = $3,
                updated_at = $4
            WHERE id = $1
              AND confirmed_count <= $2
              AND ($3 <> 'closed' OR confirmed_count = 0)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.capacity() as i32)
        .bind(status)
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update session", e))?;

        if result.rows_affected() == 0 {
            let stored = self.find_by_id(session.id()).await?.ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SessionNotFound,
                    format!("Session not found: {}", session.id()),
                )
            })?;
            if stored.confirmed_count() > session.capacity() {
                return Err(DomainError::validation(
                    "capacity",
                    format!(
                        "cannot be lowered below the {} reservations held",
                        stored.confirmed_count()
                    ),
                ));
            }
            return Err(DomainError::new(
                ErrorCode::SessionOccupied,
                format!("Session {} still holds active reservations", session.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, trainer_id, source_template_id, date, start_time, end_time,
                   capacity, confirmed_count, status, created_at, updated_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch session", e))?;

        row.map(row_to_session).transpose()
    }

    async fn find_by_template_and_date(
        &self,
        template_id: &TemplateId,
        date: NaiveDate,
    ) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, trainer_id, source_template_id, date, start_time, end_time,
                   capacity, confirmed_count, status, created_at, updated_at
            FROM sessions
            WHERE source_template_id = $1 AND date = $2
            "#,
        )
        .bind(template_id.as_uuid())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch session by template", e))?;

        row.map(row_to_session).transpose()
    }

    async fn exists_for_slot(
        &self,
        trainer_id: &TrainerId,
        date: NaiveDate,
        window: &TimeRange,
    ) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM sessions
            WHERE trainer_id = $1 AND date = $2 AND start_time = $3 AND end_time = $4
            "#,
        )
        .bind(trainer_id.as_uuid())
        .bind(date)
        .bind(window.start())
        .bind(window.end())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("check slot existence", e))?;

        Ok(result.0 > 0)
    }

    async fn list_open_by_trainer(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, trainer_id, source_template_id, date, start_time, end_time,
                   capacity, confirmed_count, status, created_at, updated_at
            FROM sessions
            WHERE trainer_id = $1 AND status = 'open'
            ORDER BY date, start_time
            "#,
        )
        .bind(trainer_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list open sessions", e))?;

        rows.into_iter().map(row_to_session).collect()
    }
}

#[async_trait]
impl CapacityLedger for PostgresSessionStore {
    async fn try_occupy(&self, session_id: &SessionId) -> Result<OccupancyToken, BookingError> {
        // single conditional increment; the capacity guard and the
        // bump are one statement, so no interleaving can overshoot
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET confirmed_count = confirmed_count + 1, updated_at = NOW()
            WHERE id = $1 AND status = 'open' AND confirmed_count < capacity
            "#,
        )
        .bind(session_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| BookingError::infrastructure(db_error("occupy session", e).to_string()))?;

        if result.rows_affected() > 0 {
            return Ok(OccupancyToken::new(*session_id));
        }

        // full, missing or withdrawn; one probe tells which
        let status: Option<(String,)> =
            sqlx::query_as("SELECT status FROM sessions WHERE id = $1")
                .bind(session_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    BookingError::infrastructure(db_error("probe session", e).to_string())
                })?;

        match status {
            Some((s,)) if s == "open" => Err(BookingError::CapacityExceeded(*session_id)),
            _ => Err(BookingError::SessionNotFound(*session_id)),
        }
    }

    async fn release(&self, session_id: &SessionId) -> Result<bool, BookingError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET confirmed_count = confirmed_count - 1, updated_at = NOW()
            WHERE id = $1 AND confirmed_count > 0
            "#,
        )
        .bind(session_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| BookingError::infrastructure(db_error("release session", e).to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn session_status_to_str(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Open => "open",
        SessionStatus::Closed => "closed",
    }
}

fn str_to_session_status(s: &str) -> Result<SessionStatus, DomainError> {
    match s {
        "open" => Ok(SessionStatus::Open),
        "closed" => Ok(SessionStatus::Closed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", s),
        )),
    }
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<Session, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| db_error("get id", e))?;
    let trainer_id: uuid::Uuid = row
        .try_get("trainer_id")
        .map_err(|e| db_error("get trainer_id", e))?;
    let source_template_id: Option<uuid::Uuid> = row
        .try_get("source_template_id")
        .map_err(|e| db_error("get source_template_id", e))?;
    let date: NaiveDate = row.try_get("date").map_err(|e| db_error("get date", e))?;
    let start_time: chrono::NaiveTime = row
        .try_get("start_time")
        .map_err(|e| db_error("get start_time", e))?;
    let end_time: chrono::NaiveTime = row
        .try_get("end_time")
        .map_err(|e| db_error("get end_time", e))?;
    let capacity: i32 = row
        .try_get("capacity")
        .map_err(|e| db_error("get capacity", e))?;
    let confirmed_count: i32 = row
        .try_get("confirmed_count")
        .map_err(|e| db_error("get confirmed_count", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| db_error("get status", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("get created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_error("get updated_at", e))?;

    let window = TimeRange::new(start_time, end_time)
        .map_err(|e| db_error("decode session window", e))?;

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        TrainerId::from_uuid(trainer_id),
        source_template_id.map(TemplateId::from_uuid),
        date,
        window,
        capacity as u32,
        confirmed_count as u32,
        str_to_session_status(&status_str)?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
