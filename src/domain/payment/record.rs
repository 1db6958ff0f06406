//! Payment record entity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{PaymentId, ReservationId, Timestamp, ValidationError};

/// Settlement status of a payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[default]
    Pendiente,
    Completado,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Pendiente => "PENDIENTE",
            PaymentStatus::Completado => "COMPLETADO",
        };
        write!(f, "{}", s)
    }
}

/// Monetary transaction recorded against a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    id: PaymentId,
    reservation_id: ReservationId,
    amount_cents: i64,
    method: String,
    status: PaymentStatus,
    created_at: Timestamp,
}

impl Payment {
    /// Creates a new pending payment record.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the amount is not positive
    /// - `EmptyField` if the method is blank
    pub fn new(
        id: PaymentId,
        reservation_id: ReservationId,
        amount_cents: i64,
        method: String,
    ) -> Result<Self, ValidationError> {
        if amount_cents <= 0 {
            return Err(ValidationError::out_of_range(
                "amount_cents",
                1,
                i64::MAX,
                amount_cents,
            ));
        }
        if method.trim().is_empty() {
            return Err(ValidationError::empty_field("method"));
        }

        Ok(Self {
            id,
            reservation_id,
            amount_cents,
            method,
            status: PaymentStatus::Pendiente,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a payment from persistence (no validation).
    pub fn reconstitute(
        id: PaymentId,
        reservation_id: ReservationId,
        amount_cents: i64,
        method: String,
        status: PaymentStatus,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            reservation_id,
            amount_cents,
            method,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> &PaymentId {
        &self.id
    }

    pub fn reservation_id(&self) -> &ReservationId {
        &self.reservation_id
    }

    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Marks the payment as settled.
    pub fn complete(&mut self) {
        self.status = PaymentStatus::Completado;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_payment_starts_pending() {
        let payment = Payment::new(
            PaymentId::new(),
            ReservationId::new(),
            2500,
            "card".to_string(),
        )
        .unwrap();

        assert_eq!(payment.status(), PaymentStatus::Pendiente);
        assert_eq!(payment.amount_cents(), 2500);
    }

    #[test]
    fn new_payment_rejects_non_positive_amount() {
        assert!(Payment::new(PaymentId::new(), ReservationId::new(), 0, "card".into()).is_err());
        assert!(Payment::new(PaymentId::new(), ReservationId::new(), -5, "card".into()).is_err());
    }

    #[test]
    fn new_payment_rejects_blank_method() {
        assert!(Payment::new(PaymentId::new(), ReservationId::new(), 100, "  ".into()).is_err());
    }

    #[test]
    fn complete_settles_payment() {
        let mut payment = Payment::new(
            PaymentId::new(),
            ReservationId::new(),
            100,
            "cash".to_string(),
        )
        .unwrap();
        payment.complete();
        assert_eq!(payment.status(), PaymentStatus::Completado);
    }

    #[test]
    fn status_serializes_to_spanish_wire_strings() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Completado).unwrap(),
            "\"COMPLETADO\""
        );
    }
}
