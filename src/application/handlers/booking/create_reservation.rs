//! CreateReservationHandler - admits or rejects a client's claim
//! against a session.
//!
//! The conflict checks run in a fixed order under the client's lock:
//! the overlap snapshot is taken before the capacity unit is claimed,
//! and a unit claimed ahead of a failed write is always given back.

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::foundation::{ClientId, ReservationId, SessionId};
use crate::domain::reservation::{BookingError, Reservation, ReservationStatus};
use crate::ports::{AccessChecker, AccessResult, CapacityLedger, ReservationRepository, SessionRepository};

use super::ClientLocks;

/// Command to create a new reservation.
#[derive(Debug, Clone)]
pub struct CreateReservationCommand {
    pub client_id: ClientId,
    pub session_id: SessionId,
    /// Initial status; defaults to the configured booking policy.
    pub initial_status: Option<ReservationStatus>,
}

/// Handler for creating reservations.
pub struct CreateReservationHandler {
    reservations: Arc<dyn ReservationRepository>,
    sessions: Arc<dyn SessionRepository>,
    ledger: Arc<dyn CapacityLedger>,
    access_checker: Arc<dyn AccessChecker>,
    client_locks: ClientLocks,
    default_status: ReservationStatus,
}

impl CreateReservationHandler {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        sessions: Arc<dyn SessionRepository>,
        ledger: Arc<dyn CapacityLedger>,
        access_checker: Arc<dyn AccessChecker>,
        client_locks: ClientLocks,
        default_status: ReservationStatus,
    ) -> Self {
        Self {
            reservations,
            sessions,
            ledger,
            access_checker,
            client_locks,
            default_status,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateReservationCommand,
    ) -> Result<Reservation, BookingError> {
        // 1. Capability check
        match self.access_checker.can_book(&cmd.client_id).await? {
            AccessResult::Allowed => {}
            AccessResult::Denied(reason) => {
                return Err(BookingError::access_denied(reason));
            }
        }

        // 2. Build the claim; validation errors must precede any write
        let status = cmd.initial_status.unwrap_or(self.default_status);
        let reservation = Reservation::new(
            ReservationId::new(),
            cmd.client_id,
            cmd.session_id,
            status,
        )?;

        // 3. Serialize with this client's other creates; the overlap
        //    snapshot below stays valid until the write lands
        let _guard = self.client_locks.acquire(&cmd.client_id).await;

        let session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(BookingError::SessionNotFound(cmd.session_id))?;
        if !session.status().is_bookable() {
            return Err(BookingError::SessionNotFound(cmd.session_id));
        }

        // 4. Per-client overlap check, before the capacity unit is taken
        let bookings = self
            .reservations
            .find_active_by_client_on_date(&cmd.client_id, session.date())
            .await?;
        if let Some(held) = bookings
            .iter()
            .find(|b| b.window.overlaps(&session.window()))
        {
            return Err(BookingError::schedule_conflict(held.date, held.window));
        }

        // 5. Atomic capacity claim
        let token = self.ledger.try_occupy(&cmd.session_id).await?;

        // 6. Durable write; a failed create must not leak held capacity
        if let Err(write_err) = self.reservations.insert(&reservation).await {
            warn!(
                session_id = %cmd.session_id,
                client_id = %cmd.client_id,
                error = %write_err,
                "reservation write failed after occupancy; releasing unit"
            );
            if let Err(release_err) = self.ledger.release(token.session_id()).await {
                error!(
                    session_id = %cmd.session_id,
                    error = %release_err,
                    "compensating release failed; session counter needs repair"
                );
            }
            return Err(write_err.into());
        }

        // the stored reservation now holds the unit
        drop(token);
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::access::StubAccessChecker;
    use crate::adapters::memory::{InMemoryReservationStore, InMemorySessionStore};
    use crate::domain::foundation::{DomainError, ErrorCode, TimeRange, TrainerId};
    use crate::domain::session::Session;
    use crate::ports::ClientBooking;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime};

    fn window(sh: u32, sm: u32, eh: u32, em: u32) -> TimeRange {
        TimeRange::new(
            NaiveTime::from_hms_opt(sh, sm, 0).unwrap(),
            NaiveTime::from_hms_opt(eh, em, 0).unwrap(),
        )
        .unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    struct Fixture {
        sessions: Arc<InMemorySessionStore>,
        reservations: Arc<InMemoryReservationStore>,
        handler: CreateReservationHandler,
    }

    fn fixture_with_checker(checker: StubAccessChecker) -> Fixture {
        let sessions = Arc::new(InMemorySessionStore::new());
        let reservations = Arc::new(InMemoryReservationStore::new(Arc::clone(&sessions)));
        let handler = CreateReservationHandler::new(
            Arc::clone(&reservations) as Arc<dyn ReservationRepository>,
            Arc::clone(&sessions) as Arc<dyn SessionRepository>,
            Arc::clone(&sessions) as Arc<dyn CapacityLedger>,
            Arc::new(checker),
            ClientLocks::new(),
            ReservationStatus::Pendiente,
        );
        Fixture {
            sessions,
            reservations,
            handler,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_checker(StubAccessChecker::new())
    }

    async fn published_session(fixture: &Fixture, w: TimeRange, capacity: u32) -> Session {
        let session = Session::publish(
            SessionId::new(),
            TrainerId::new(),
            monday(),
            w,
            capacity,
        )
        .unwrap();
        fixture.sessions.save(&session).await.unwrap();
        session
    }

    fn cmd(client_id: ClientId, session_id: SessionId) -> CreateReservationCommand {
        CreateReservationCommand {
            client_id,
            session_id,
            initial_status: None,
        }
    }

    #[tokio::test]
    async fn creates_pending_reservation_by_default() {
        let f = fixture();
        let session = published_session(&f, window(10, 0, 11, 0), 3).await;

        let reservation = f.handler.handle(cmd(ClientId::new(), *session.id())).await.unwrap();

        assert_eq!(reservation.status(), ReservationStatus::Pendiente);
        assert_eq!(f.sessions.confirmed_count(session.id()).await, Some(1));
    }

    #[tokio::test]
    async fn caller_may_request_confirmed_directly() {
        let f = fixture();
        let session = published_session(&f, window(10, 0, 11, 0), 3).await;

        let reservation = f
            .handler
            .handle(CreateReservationCommand {
                client_id: ClientId::new(),
                session_id: *session.id(),
                initial_status: Some(ReservationStatus::Confirmada),
            })
            .await
            .unwrap();

        assert_eq!(reservation.status(), ReservationStatus::Confirmada);
    }

    #[tokio::test]
    async fn rejects_cancelled_initial_status_before_any_write() {
        let f = fixture();
        let session = published_session(&f, window(10, 0, 11, 0), 3).await;

        let result = f
            .handler
            .handle(CreateReservationCommand {
                client_id: ClientId::new(),
                session_id: *session.id(),
                initial_status: Some(ReservationStatus::Cancelada),
            })
            .await;

        assert!(matches!(result, Err(BookingError::ValidationFailed { .. })));
        assert_eq!(f.sessions.confirmed_count(session.id()).await, Some(0));
    }

    #[tokio::test]
    async fn fails_when_session_is_full() {
        let f = fixture();
        let session = published_session(&f, window(10, 0, 11, 0), 1).await;

        f.handler.handle(cmd(ClientId::new(), *session.id())).await.unwrap();
        let result = f.handler.handle(cmd(ClientId::new(), *session.id())).await;

        assert!(matches!(result, Err(BookingError::CapacityExceeded(_))));
        assert_eq!(f.sessions.confirmed_count(session.id()).await, Some(1));
    }

    #[tokio::test]
    async fn fails_on_overlapping_booking_for_same_client() {
        let f = fixture();
        let first = published_session(&f, window(10, 0, 11, 0), 3).await;
        let overlapping = published_session(&f, window(10, 30, 11, 30), 3).await;
        let client_id = ClientId::new();

        f.handler.handle(cmd(client_id, *first.id())).await.unwrap();
        let result = f.handler.handle(cmd(client_id, *overlapping.id())).await;

        assert!(matches!(result, Err(BookingError::ScheduleConflict { .. })));
        // the losing request must not have held a unit
        assert_eq!(f.sessions.confirmed_count(overlapping.id()).await, Some(0));
    }

    #[tokio::test]
    async fn touching_windows_do_not_conflict() {
        let f = fixture();
        let first = published_session(&f, window(10, 0, 11, 0), 3).await;
        let adjacent = published_session(&f, window(11, 0, 12, 0), 3).await;
        let client_id = ClientId::new();

        f.handler.handle(cmd(client_id, *first.id())).await.unwrap();
        assert!(f.handler.handle(cmd(client_id, *adjacent.id())).await.is_ok());
    }

    #[tokio::test]
    async fn cancelled_bookings_do_not_block_rebooking() {
        let f = fixture();
        let first = published_session(&f, window(10, 0, 11, 0), 3).await;
        let overlapping = published_session(&f, window(10, 0, 11, 0), 3).await;
        let client_id = ClientId::new();

        // same window but first booking is cancelled in between
        let held = f.handler.handle(cmd(client_id, *first.id())).await.unwrap();
        f.reservations.mark_cancelled(held.id()).await.unwrap();
        f.sessions.release(first.id()).await.unwrap();

        let result = f.handler.handle(cmd(client_id, *overlapping.id())).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let f = fixture();
        let result = f.handler.handle(cmd(ClientId::new(), SessionId::new())).await;
        assert!(matches!(result, Err(BookingError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn closed_session_is_not_bookable() {
        let f = fixture();
        let mut session = Session::publish(
            SessionId::new(),
            TrainerId::new(),
            monday(),
            window(10, 0, 11, 0),
            3,
        )
        .unwrap();
        session.close().unwrap();
        f.sessions.save(&session).await.unwrap();

        let result = f.handler.handle(cmd(ClientId::new(), *session.id())).await;
        assert!(matches!(result, Err(BookingError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn denied_caller_cannot_book() {
        let f = fixture_with_checker(StubAccessChecker::denying());
        let session = published_session(&f, window(10, 0, 11, 0), 3).await;

        let result = f.handler.handle(cmd(ClientId::new(), *session.id())).await;
        assert!(matches!(result, Err(BookingError::AccessDenied(_))));
        assert_eq!(f.sessions.confirmed_count(session.id()).await, Some(0));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Compensation on write failure
    // ─────────────────────────────────────────────────────────────────────────

    /// Reservation repository whose insert always fails, for driving
    /// the compensating-release path.
    struct FailingInsertRepository {
        inner: Arc<InMemoryReservationStore>,
    }

    #[async_trait]
    impl ReservationRepository for FailingInsertRepository {
        async fn insert(&self, _reservation: &Reservation) -> Result<(), DomainError> {
            Err(DomainError::new(
                ErrorCode::DatabaseError,
                "simulated insert failure",
            ))
        }

        async fn update(&self, reservation: &Reservation) -> Result<(), DomainError> {
            self.inner.update(reservation).await
        }

        async fn find_by_id(
            &self,
            id: &ReservationId,
        ) -> Result<Option<Reservation>, DomainError> {
            self.inner.find_by_id(id).await
        }

        async fn mark_cancelled(&self, id: &ReservationId) -> Result<bool, DomainError> {
            self.inner.mark_cancelled(id).await
        }

        async fn find_active_by_client_on_date(
            &self,
            client_id: &ClientId,
            date: NaiveDate,
        ) -> Result<Vec<ClientBooking>, DomainError> {
            self.inner.find_active_by_client_on_date(client_id, date).await
        }

        async fn find_by_session(
            &self,
            session_id: &SessionId,
        ) -> Result<Vec<Reservation>, DomainError> {
            self.inner.find_by_session(session_id).await
        }

        async fn find_by_client(
            &self,
            client_id: &ClientId,
        ) -> Result<Vec<Reservation>, DomainError> {
            self.inner.find_by_client(client_id).await
        }
    }

    #[tokio::test]
    async fn failed_write_releases_the_held_unit() {
        let sessions = Arc::new(InMemorySessionStore::new());
        let inner = Arc::new(InMemoryReservationStore::new(Arc::clone(&sessions)));
        let failing = Arc::new(FailingInsertRepository {
            inner: Arc::clone(&inner),
        });
        let handler = CreateReservationHandler::new(
            failing,
            Arc::clone(&sessions) as Arc<dyn SessionRepository>,
            Arc::clone(&sessions) as Arc<dyn CapacityLedger>,
            Arc::new(StubAccessChecker::new()),
            ClientLocks::new(),
            ReservationStatus::Pendiente,
        );

        let session = Session::publish(
            SessionId::new(),
            TrainerId::new(),
            monday(),
            window(10, 0, 11, 0),
            1,
        )
        .unwrap();
        sessions.save(&session).await.unwrap();

        let result = handler.handle(cmd(ClientId::new(), *session.id())).await;
        assert!(matches!(result, Err(BookingError::Infrastructure(_))));

        // counter back at its pre-attempt value, slot still bookable
        assert_eq!(sessions.confirmed_count(session.id()).await, Some(0));
        let retry_handler = CreateReservationHandler::new(
            Arc::clone(&inner) as Arc<dyn ReservationRepository>,
            Arc::clone(&sessions) as Arc<dyn SessionRepository>,
            Arc::clone(&sessions) as Arc<dyn CapacityLedger>,
            Arc::new(StubAccessChecker::new()),
            ClientLocks::new(),
            ReservationStatus::Pendiente,
        );
        assert!(retry_handler
            .handle(cmd(ClientId::new(), *session.id()))
            .await
            .is_ok());
    }
}
