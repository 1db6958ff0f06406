//! Read paths for reservations: pass-through queries, not part of the
//! engine's correctness surface.

use std::sync::Arc;

use crate::domain::foundation::{ClientId, SessionId};
use crate::domain::reservation::{BookingError, Reservation};
use crate::ports::ReservationRepository;

/// Query handler for reservation listings.
pub struct ListReservationsHandler {
    reservations: Arc<dyn ReservationRepository>,
}

impl ListReservationsHandler {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    /// All reservations against a session.
    pub async fn by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Reservation>, BookingError> {
        Ok(self.reservations.find_by_session(session_id).await?)
    }

    /// All reservations of a client.
    pub async fn by_client(&self, client_id: &ClientId) -> Result<Vec<Reservation>, BookingError> {
        Ok(self.reservations.find_by_client(client_id).await?)
    }
}
