//! In-memory reservation store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::foundation::{ClientId, DomainError, ErrorCode, ReservationId, SessionId};
use crate::domain::reservation::Reservation;
use crate::ports::{ClientBooking, ReservationRepository, SessionRepository};

use super::InMemorySessionStore;

/// In-memory implementation of [`ReservationRepository`].
///
/// Holds a handle to the session store so the overlap read can join a
/// reservation with its session's slot, as the relational adapter does
/// with a SQL join.
#[derive(Debug)]
pub struct InMemoryReservationStore {
    reservations: Arc<RwLock<HashMap<ReservationId, Reservation>>>,
    sessions: Arc<InMemorySessionStore>,
}

impl InMemoryReservationStore {
    pub fn new(sessions: Arc<InMemorySessionStore>) -> Self {
        Self {
            reservations: Arc::new(RwLock::new(HashMap::new())),
            sessions,
        }
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationStore {
    async fn insert(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let mut reservations = self.reservations.write().await;
        reservations.insert(*reservation.id(), reservation.clone());
        Ok(())
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let mut reservations = self.reservations.write().await;
        if !reservations.contains_key(reservation.id()) {
            return Err(DomainError::new(
                ErrorCode::ReservationNotFound,
                format!("Reservation not found: {}", reservation.id()),
            ));
        }
        reservations.insert(*reservation.id(), reservation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        Ok(self.reservations.read().await.get(id).cloned())
    }

    async fn mark_cancelled(&self, id: &ReservationId) -> Result<bool, DomainError> {
        let mut reservations = self.reservations.write().await;
        let reservation = reservations.get_mut(id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::ReservationNotFound,
                format!("Reservation not found: {}", id),
            )
        })?;
        Ok(reservation.cancel())
    }

    async fn find_active_by_client_on_date(
        &self,
        client_id: &ClientId,
        date: NaiveDate,
    ) -> Result<Vec<ClientBooking>, DomainError> {
        let reservations = self.reservations.read().await;
        let mut bookings = Vec::new();

        for reservation in reservations.values() {
            if reservation.client_id() != client_id || !reservation.is_active() {
                continue;
            }
            let Some(session) = self.sessions.find_by_id(reservation.session_id()).await? else {
                continue;
            };
            if session.date() != date {
                continue;
            }
            bookings.push(ClientBooking {
                reservation_id: *reservation.id(),
                session_id: *session.id(),
                date: session.date(),
                window: session.window(),
            });
        }

        Ok(bookings)
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Reservation>, DomainError> {
        let reservations = self.reservations.read().await;
        let mut matching: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.session_id() == session_id)
            .cloned()
            .collect();
        matching.sort_by_key(|r| *r.created_at());
        Ok(matching)
    }

    async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<Reservation>, DomainError> {
        let reservations = self.reservations.read().await;
        let mut matching: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.client_id() == client_id)
            .cloned()
            .collect();
        matching.sort_by_key(|r| std::cmp::Reverse(*r.created_at()));
        Ok(matching)
    }
}
