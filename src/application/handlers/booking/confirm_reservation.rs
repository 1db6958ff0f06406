//! ConfirmReservationHandler - moves a pending claim to confirmed.
//!
//! Capacity was already held at creation; confirmation never touches
//! the ledger.

use std::sync::Arc;

use crate::domain::foundation::ReservationId;
use crate::domain::reservation::{BookingError, Reservation};
use crate::ports::ReservationRepository;

/// Command to confirm a pending reservation.
#[derive(Debug, Clone)]
pub struct ConfirmReservationCommand {
    pub reservation_id: ReservationId,
}

/// Handler for confirming reservations.
pub struct ConfirmReservationHandler {
    reservations: Arc<dyn ReservationRepository>,
}

impl ConfirmReservationHandler {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmReservationCommand,
    ) -> Result<Reservation, BookingError> {
        let mut reservation = self
            .reservations
            .find_by_id(&cmd.reservation_id)
            .await?
            .ok_or(BookingError::NotFound(cmd.reservation_id))?;

        reservation.confirm()?;
        self.reservations.update(&reservation).await?;

        Ok(reservation)
    }
}
