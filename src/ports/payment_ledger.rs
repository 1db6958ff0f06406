//! Payment ledger port.
//!
//! Payments are foreign writes the booking core records but does not
//! validate beyond reservation existence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ReservationId};
use crate::domain::payment::Payment;

/// Port for persisting payment records.
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Insert a new payment record.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, payment: &Payment) -> Result<(), DomainError>;

    /// All payments recorded against a reservation, oldest first.
    async fn find_by_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Vec<Payment>, DomainError>;
}
