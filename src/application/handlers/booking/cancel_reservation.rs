//! CancelReservationHandler - terminal transition that gives the
//! capacity unit back.
//!
//! Cancelling an already-cancelled reservation is a no-op so client
//! retries stay harmless; the conditional status flip in the
//! repository guarantees the ledger release runs at most once even
//! under concurrent retries.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::ReservationId;
use crate::domain::reservation::BookingError;
use crate::ports::{CapacityLedger, ReservationRepository};

/// Command to cancel a reservation.
#[derive(Debug, Clone)]
pub struct CancelReservationCommand {
    pub reservation_id: ReservationId,
}

/// Handler for cancelling reservations.
pub struct CancelReservationHandler {
    reservations: Arc<dyn ReservationRepository>,
    ledger: Arc<dyn CapacityLedger>,
}

impl CancelReservationHandler {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        ledger: Arc<dyn CapacityLedger>,
    ) -> Self {
        Self {
            reservations,
            ledger,
        }
    }

    pub async fn handle(&self, cmd: CancelReservationCommand) -> Result<(), BookingError> {
        let reservation = self
            .reservations
            .find_by_id(&cmd.reservation_id)
            .await?
            .ok_or(BookingError::NotFound(cmd.reservation_id))?;

        if !reservation.is_active() {
            // idempotent repeat; the unit was already given back
            return Ok(());
        }

        let flipped = self.reservations.mark_cancelled(&cmd.reservation_id).await?;
        if flipped {
            let freed = self.ledger.release(reservation.session_id()).await?;
            if !freed {
                warn!(
                    reservation_id = %cmd.reservation_id,
                    session_id = %reservation.session_id(),
                    "cancelled a reservation but the session counter was already zero"
                );
            }
        }

        Ok(())
    }
}
