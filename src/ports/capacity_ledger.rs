//! Session capacity ledger port.
//!
//! The ledger is the single authority over a session's occupancy
//! counter. `try_occupy` is the one indivisible check-and-increment
//! the no-overbooking guarantee rests on: it must observe
//! `confirmed_count < capacity` and increment in one atomic step
//! relative to all concurrent callers for the same session.
//!
//! Concurrent occupancy of *different* sessions must not contend.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::reservation::BookingError;

/// Receipt for one held capacity unit.
///
/// Deliberately neither `Clone` nor `Copy`: a token is consumed exactly
/// once, either by the reservation write that keeps the unit or by a
/// compensating [`CapacityLedger::release`].
#[derive(Debug, PartialEq, Eq)]
pub struct OccupancyToken {
    session_id: SessionId,
}

impl OccupancyToken {
    /// Creates a token for a successfully occupied unit.
    ///
    /// Only ledger implementations should mint tokens.
    pub fn new(session_id: SessionId) -> Self {
        Self { session_id }
    }

    /// Returns the session the unit is held against.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }
}

/// Port for atomic occupancy accounting against session capacity.
#[async_trait]
pub trait CapacityLedger: Send + Sync {
    /// Atomically claim one capacity unit of the session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session does not exist or is closed
    /// - `CapacityExceeded` if the session is full
    async fn try_occupy(&self, session_id: &SessionId) -> Result<OccupancyToken, BookingError>;

    /// Give one capacity unit back, never dropping the counter below
    /// zero.
    ///
    /// Returns `true` when a unit was actually freed. Callers guarantee
    /// at-most-once release per held token: the create path consumes
    /// its token on either outcome, and the cancel path releases only
    /// when the status flip actually happened.
    async fn release(&self, session_id: &SessionId) -> Result<bool, BookingError>;
}
