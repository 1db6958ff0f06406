//! UpdateReservationStatusHandler - administrative entry point for
//! status corrections.
//!
//! Delegates to the confirm and cancel flows so the transition table
//! and the ledger discipline are enforced in exactly one place per
//! transition. No requested status is ever silently coerced.

use std::sync::Arc;

use crate::domain::foundation::ReservationId;
use crate::domain::reservation::{BookingError, Reservation, ReservationStatus};
use crate::ports::ReservationRepository;

use super::{
    CancelReservationCommand, CancelReservationHandler, ConfirmReservationCommand,
    ConfirmReservationHandler,
};

/// Command to set a reservation's status.
#[derive(Debug, Clone)]
pub struct UpdateReservationStatusCommand {
    pub reservation_id: ReservationId,
    pub status: ReservationStatus,
}

/// Handler for administrative status updates.
pub struct UpdateReservationStatusHandler {
    reservations: Arc<dyn ReservationRepository>,
    confirm: Arc<ConfirmReservationHandler>,
    cancel: Arc<CancelReservationHandler>,
}

impl UpdateReservationStatusHandler {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        confirm: Arc<ConfirmReservationHandler>,
        cancel: Arc<CancelReservationHandler>,
    ) -> Self {
        Self {
            reservations,
            confirm,
            cancel,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateReservationStatusCommand,
    ) -> Result<Reservation, BookingError> {
        match cmd.status {
            ReservationStatus::Confirmada => {
                self.confirm
                    .handle(ConfirmReservationCommand {
                        reservation_id: cmd.reservation_id,
                    })
                    .await
            }
            ReservationStatus::Cancelada => {
                self.cancel
                    .handle(CancelReservationCommand {
                        reservation_id: cmd.reservation_id,
                    })
                    .await?;
                self.reservations
                    .find_by_id(&cmd.reservation_id)
                    .await?
                    .ok_or(BookingError::NotFound(cmd.reservation_id))
            }
            ReservationStatus::Pendiente => {
                // no transition leads back to PENDIENTE
                let reservation = self
                    .reservations
                    .find_by_id(&cmd.reservation_id)
                    .await?
                    .ok_or(BookingError::NotFound(cmd.reservation_id))?;
                Err(BookingError::invalid_transition(
                    reservation.status(),
                    ReservationStatus::Pendiente,
                ))
            }
        }
    }
}
