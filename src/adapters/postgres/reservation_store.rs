//! PostgreSQL implementation of ReservationRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, ReservationId, SessionId, TimeRange, Timestamp,
};
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::ports::{ClientBooking, ReservationRepository};

use super::db_error;

/// PostgreSQL implementation of [`ReservationRepository`].
#[derive(Clone)]
pub struct PostgresReservationStore {
    pool: PgPool,
}

impl PostgresReservationStore {
    /// Creates a new PostgresReservationStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationStore {
    async fn insert(&self, reservation: &Reservation) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reservations (id, client_id, session_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(reservation.id().as_uuid())
        .bind(reservation.client_id().as_uuid())
        .bind(reservation.session_id().as_uuid())
        .bind(reservation_status_to_str(reservation.status()))
        .bind(reservation.created_at().as_datetime())
        .bind(reservation.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert reservation", e))?;

        Ok(())
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE reservations SET status = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(reservation.id().as_uuid())
        .bind(reservation_status_to_str(reservation.status()))
        .bind(reservation.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update reservation", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ReservationNotFound,
                format!("Reservation not found: {}", reservation.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, client_id, session_id, status, created_at, updated_at
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch reservation", e))?;

        row.map(row_to_reservation).transpose()
    }

    async fn mark_cancelled(&self, id: &ReservationId) -> Result<bool, DomainError> {
        // conditional flip: at most one caller observes a change, so
        // the capacity unit is released at most once
        let result = sqlx::query(
            r#"
            UPDATE reservations SET status = 'CANCELADA', updated_at = NOW()
            WHERE id = $1 AND status <> 'CANCELADA'
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("cancel reservation", e))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        let exists: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reservations WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("probe reservation", e))?;
        if exists.0 == 0 {
            return Err(DomainError::new(
                ErrorCode::ReservationNotFound,
                format!("Reservation not found: {}", id),
            ));
        }

        Ok(false)
    }

    async fn find_active_by_client_on_date(
        &self,
        client_id: &ClientId,
        date: NaiveDate,
    ) -> Result<Vec<ClientBooking>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT r.id AS reservation_id, r.session_id, s.date, s.start_time, s.end_time
            FROM reservations r
            JOIN sessions s ON s.id = r.session_id
            WHERE r.client_id = $1 AND r.status <> 'CANCELADA' AND s.date = $2
            "#,
        )
        .bind(client_id.as_uuid())
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch client bookings", e))?;

        rows.into_iter().map(row_to_client_booking).collect()
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Reservation>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, client_id, session_id, status, created_at, updated_at
            FROM reservations
            WHERE session_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch reservations by session", e))?;

        rows.into_iter().map(row_to_reservation).collect()
    }

    async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<Reservation>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, client_id, session_id, status, created_at, updated_at
            FROM reservations
            WHERE client_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(client_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch reservations by client", e))?;

        rows.into_iter().map(row_to_reservation).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn reservation_status_to_str(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Pendiente => "PENDIENTE",
        ReservationStatus::Confirmada => "CONFIRMADA",
        ReservationStatus::Cancelada => "CANCELADA",
    }
}

fn str_to_reservation_status(s: &str) -> Result<ReservationStatus, DomainError> {
    match s {
        "PENDIENTE" => Ok(ReservationStatus::Pendiente),
        "CONFIRMADA" => Ok(ReservationStatus::Confirmada),
        "CANCELADA" => Ok(ReservationStatus::Cancelada),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid reservation status: {}", s),
        )),
    }
}

fn row_to_reservation(row: sqlx::postgres::PgRow) -> Result<Reservation, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_error("get id", e))?;
    let client_id: uuid::Uuid = row
        .try_get("client_id")
        .map_err(|e| db_error("get client_id", e))?;
    let session_id: uuid::Uuid = row
        .try_get("session_id")
        .map_err(|e| db_error("get session_id", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| db_error("get status", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("get created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_error("get updated_at", e))?;

    Ok(Reservation::reconstitute(
        ReservationId::from_uuid(id),
        ClientId::from_uuid(client_id),
        SessionId::from_uuid(session_id),
        str_to_reservation_status(&status_str)?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_client_booking(row: sqlx::postgres::PgRow) -> Result<ClientBooking, DomainError> {
    let reservation_id: uuid::Uuid = row
        .try_get("reservation_id")
        .map_err(|e| db_error("get reservation_id", e))?;
    let session_id: uuid::Uuid = row
        .try_get("session_id")
        .map_err(|e| db_error("get session_id", e))?;
    let date: NaiveDate = row.try_get("date").map_err(|e| db_error("get date", e))?;
    let start_time: chrono::NaiveTime = row
        .try_get("start_time")
        .map_err(|e| db_error("get start_time", e))?;
    let end_time: chrono::NaiveTime = row
        .try_get("end_time")
        .map_err(|e| db_error("get end_time", e))?;

    let window = TimeRange::new(start_time, end_time)
        .map_err(|e| db_error("decode session window", e))?;

    Ok(ClientBooking {
        reservation_id: ReservationId::from_uuid(reservation_id),
        session_id: SessionId::from_uuid(session_id),
        date,
        window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_status_conversion_roundtrips() {
        for status in [
            ReservationStatus::Pendiente,
            ReservationStatus::Confirmada,
            ReservationStatus::Cancelada,
        ] {
            assert_eq!(
                str_to_reservation_status(reservation_status_to_str(status)).unwrap(),
                status
            );
        }
    }

    #[test]
    fn str_to_reservation_status_rejects_invalid() {
        assert!(str_to_reservation_status("pendiente").is_err());
        assert!(str_to_reservation_status("DONE").is_err());
    }
}
