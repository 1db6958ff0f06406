//! Reservation aggregate entity.
//!
//! A reservation is a client's claim against one session. Its status
//! moves through the transition table on [`ReservationStatus`]; the
//! occupancy unit it holds is acquired at creation and given back when
//! the reservation is cancelled.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, ReservationId, SessionId, Timestamp};

use super::{BookingError, ReservationStatus};

/// A client's claim against a session.
///
/// # Invariants
///
/// - status follows the [`ReservationStatus`] transition table
/// - a cancelled reservation never becomes active again
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    client_id: ClientId,
    session_id: SessionId,
    status: ReservationStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Reservation {
    /// Creates a new reservation in the given initial status.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the initial status is `CANCELADA`;
    ///   reservations come into existence holding a capacity unit
    pub fn new(
        id: ReservationId,
        client_id: ClientId,
        session_id: SessionId,
        initial_status: ReservationStatus,
    ) -> Result<Self, BookingError> {
        if !initial_status.is_active() {
            return Err(BookingError::validation(
                "status",
                "a reservation cannot be created already cancelled",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            client_id,
            session_id,
            status: initial_status,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a reservation from persistence (no validation).
    pub fn reconstitute(
        id: ReservationId,
        client_id: ClientId,
        session_id: SessionId,
        status: ReservationStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            client_id,
            session_id,
            status,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ReservationId {
        &self.id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns true while the reservation holds a capacity unit.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Confirm a pending reservation.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the current status is `PENDIENTE`
    pub fn confirm(&mut self) -> Result<(), BookingError> {
        if !self.status.can_transition_to(&ReservationStatus::Confirmada) {
            return Err(BookingError::invalid_transition(
                self.status,
                ReservationStatus::Confirmada,
            ));
        }

        self.status = ReservationStatus::Confirmada;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Cancel the reservation.
    ///
    /// Returns `true` when a capacity unit was actually given up, and
    /// `false` for the idempotent repeat on an already-cancelled
    /// reservation. The caller releases the ledger unit only on `true`.
    pub fn cancel(&mut self) -> bool {
        if self.status == ReservationStatus::Cancelada {
            return false;
        }

        self.status = ReservationStatus::Cancelada;
        self.updated_at = Timestamp::now();
        true
    }
}
