//! PostgreSQL implementation of PaymentLedger.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, ReservationId, Timestamp};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::ports::PaymentLedger;

use super::db_error;

/// PostgreSQL implementation of [`PaymentLedger`].
#[derive(Clone)]
pub struct PostgresPaymentLedger {
    pool: PgPool,
}

impl PostgresPaymentLedger {
    /// Creates a new PostgresPaymentLedger.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentLedger for PostgresPaymentLedger {
    async fn insert(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, reservation_id, amount_cents, method, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(payment.id().as_uuid())
        .bind(payment.reservation_id().as_uuid())
        .bind(payment.amount_cents())
        .bind(payment.method())
        .bind(payment_status_to_str(payment.status()))
        .bind(payment.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert payment", e))?;

        Ok(())
    }

    async fn find_by_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Vec<Payment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, reservation_id, amount_cents, method, status, created_at
            FROM payments
            WHERE reservation_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(reservation_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch payments", e))?;

        rows.into_iter().map(row_to_payment).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn payment_status_to_str(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pendiente => "PENDIENTE",
        PaymentStatus::Completado => "COMPLETADO",
    }
}

fn str_to_payment_status(s: &str) -> Result<PaymentStatus, DomainError> {
    match s {
        "PENDIENTE" => Ok(PaymentStatus::Pendiente),
        "COMPLETADO" => Ok(PaymentStatus::Completado),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment status: {}", s),
        )),
    }
}

fn row_to_payment(row: sqlx::postgres::PgRow) -> Result<Payment, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_error("get id", e))?;
    let reservation_id: uuid::Uuid = row
        .try_get("reservation_id")
        .map_err(|e| db_error("get reservation_id", e))?;
    let amount_cents: i64 = row
        .try_get("amount_cents")
        .map_err(|e| db_error("get amount_cents", e))?;
    let method: String = row
        .try_get("method")
        .map_err(|e| db_error("get method", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| db_error("get status", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("get created_at", e))?;

    Ok(Payment::reconstitute(
        PaymentId::from_uuid(id),
        ReservationId::from_uuid(reservation_id),
        amount_cents,
        method,
        str_to_payment_status(&status_str)?,
        Timestamp::from_datetime(created_at),
    ))
}
