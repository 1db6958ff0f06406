//! Reservation repository port (write side plus the engine's one
//! consistent read).

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{ClientId, DomainError, ReservationId, SessionId, TimeRange};
use crate::domain::reservation::Reservation;

/// A client's active claim joined with its session's slot, as needed by
/// the overlap check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBooking {
    pub reservation_id: ReservationId,
    pub session_id: SessionId,
    pub date: NaiveDate,
    pub window: TimeRange,
}

/// Repository port for Reservation persistence.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a new reservation.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, reservation: &Reservation) -> Result<(), DomainError>;

    /// Update an existing reservation.
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` if the reservation doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, reservation: &Reservation) -> Result<(), DomainError>;

    /// Find a reservation by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError>;

    /// Flip a reservation to `CANCELADA` if and only if it is not
    /// already cancelled.
    ///
    /// Returns `true` when the flip happened. The conditional write is
    /// what keeps concurrent double-cancels from freeing the same
    /// capacity unit twice.
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` if the reservation doesn't exist
    async fn mark_cancelled(&self, id: &ReservationId) -> Result<bool, DomainError>;

    /// All non-cancelled reservations of a client whose session falls
    /// on the given date, joined with the session slot.
    ///
    /// The overlap check requires this read to be consistent with the
    /// reservation writes it races against; the create path holds a
    /// per-client lock across read and write to guarantee it.
    async fn find_active_by_client_on_date(
        &self,
        client_id: &ClientId,
        date: NaiveDate,
    ) -> Result<Vec<ClientBooking>, DomainError>;

    /// All reservations against a session, oldest first.
    async fn find_by_session(&self, session_id: &SessionId)
        -> Result<Vec<Reservation>, DomainError>;

    /// All reservations of a client, newest first.
    async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<Reservation>, DomainError>;
}
