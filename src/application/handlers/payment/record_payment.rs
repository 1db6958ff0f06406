//! RecordPaymentHandler - attaches a monetary transaction to a
//! reservation.
//!
//! The reservation's status is read once to decide whether to accept
//! the payment; nothing here feeds back into booking correctness.

use std::sync::Arc;

use crate::domain::foundation::{PaymentId, ReservationId};
use crate::domain::payment::{Payment, PaymentError, PaymentStatus};
use crate::ports::{PaymentLedger, ReservationRepository};

/// Command to record a payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentCommand {
    pub reservation_id: ReservationId,
    pub amount_cents: i64,
    pub method: String,
    /// Mark the payment settled right away (e.g. cash at the desk).
    pub completed: bool,
}

/// Handler for recording payments.
pub struct RecordPaymentHandler {
    payments: Arc<dyn PaymentLedger>,
    reservations: Arc<dyn ReservationRepository>,
}

impl RecordPaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentLedger>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            payments,
            reservations,
        }
    }

    pub async fn handle(&self, cmd: RecordPaymentCommand) -> Result<Payment, PaymentError> {
        let reservation = self
            .reservations
            .find_by_id(&cmd.reservation_id)
            .await
            .map_err(|e| PaymentError::infrastructure(e.to_string()))?
            .ok_or(PaymentError::ReservationNotFound(cmd.reservation_id))?;

        if !reservation.is_active() {
            return Err(PaymentError::NotPayable(cmd.reservation_id));
        }

        let mut payment = Payment::new(
            PaymentId::new(),
            cmd.reservation_id,
            cmd.amount_cents,
            cmd.method,
        )?;
        if cmd.completed {
            payment.complete();
        }

        self.payments.insert(&payment).await?;
        Ok(payment)
    }

    /// All payments recorded against a reservation.
    pub async fn list_by_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Vec<Payment>, PaymentError> {
        Ok(self.payments.find_by_reservation(reservation_id).await?)
    }
}
