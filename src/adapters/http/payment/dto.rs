//! HTTP DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ReservationId;
use crate::domain::payment::{Payment, PaymentStatus};

/// Request to record a payment.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPaymentRequest {
    pub reservation_id: ReservationId,
    pub amount_cents: i64,
    pub method: String,
    #[serde(default)]
    pub completed: bool,
}

/// Payment view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub reservation_id: String,
    pub amount_cents: i64,
    pub method: String,
    pub status: PaymentStatus,
    pub created_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id().to_string(),
            reservation_id: payment.reservation_id().to_string(),
            amount_cents: payment.amount_cents(),
            method: payment.method().to_string(),
            status: payment.status(),
            created_at: payment.created_at().as_datetime().to_rfc3339(),
        }
    }
}
