//! In-memory session store: repository and capacity ledger over one map.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, TemplateId, TimeRange, TrainerId,
};
use crate::domain::reservation::BookingError;
use crate::domain::session::Session;
use crate::ports::{CapacityLedger, OccupancyToken, SessionRepository};

/// In-memory implementation of [`SessionRepository`] and
/// [`CapacityLedger`].
///
/// Both ports share the same map on purpose: the ledger's conditional
/// increment and the repository's reads observe a single source of
/// truth, the way the relational adapter shares one table.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a session's occupancy counter, for assertions.
    pub async fn confirmed_count(&self, id: &SessionId) -> Option<u32> {
        self.sessions.read().await.get(id).map(Session::confirmed_count)
    }

    fn with_confirmed_count(session: &Session, confirmed_count: u32) -> Session {
        Session::reconstitute(
            *session.id(),
            *session.trainer_id(),
            session.source_template_id().copied(),
            session.date(),
            session.window(),
            session.capacity(),
            confirmed_count,
            session.status(),
            *session.created_at(),
            *session.updated_at(),
        )
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;

        let duplicate = sessions.values().any(|existing| {
            let same_template_instance = session.source_template_id().is_some()
                && existing.source_template_id() == session.source_template_id()
                && existing.date() == session.date();
            let same_slot = existing.trainer_id() == session.trainer_id()
                && existing.date() == session.date()
                && existing.window() == session.window();
            same_template_instance || same_slot
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::DuplicateSession,
                format!(
                    "session for {} {} already exists",
                    session.date(),
                    session.window()
                ),
            ));
        }

        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;

        let existing = sessions.get(session.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            )
        })?;
        let held = existing.confirmed_count();

        if session.capacity() < held {
            return Err(DomainError::validation(
                "capacity",
                format!("cannot be lowered below the {} reservations held", held),
            ));
        }
        if !session.status().is_bookable() && held > 0 {
            return Err(DomainError::new(
                ErrorCode::SessionOccupied,
                format!("Session {} still holds active reservations", session.id()),
            ));
        }

        // confirmed_count stays ledger-owned; carry the stored value over
        let stored = Self::with_confirmed_count(session, held);
        sessions.insert(*session.id(), stored);
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn find_by_template_and_date(
        &self,
        template_id: &TemplateId,
        date: NaiveDate,
    ) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .find(|s| s.source_template_id() == Some(template_id) && s.date() == date)
            .cloned())
    }

    async fn exists_for_slot(
        &self,
        trainer_id: &TrainerId,
        date: NaiveDate,
        window: &TimeRange,
    ) -> Result<bool, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.values().any(|s| {
            s.trainer_id() == trainer_id && s.date() == date && s.window() == *window
        }))
    }

    async fn list_open_by_trainer(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Vec<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        let mut open: Vec<Session> = sessions
            .values()
            .filter(|s| s.trainer_id() == trainer_id && s.status().is_bookable())
            .cloned()
            .collect();
        open.sort_by_key(|s| (s.date(), s.window().start()));
        Ok(open)
    }
}

#[async_trait]
impl CapacityLedger for InMemorySessionStore {
    async fn try_occupy(&self, session_id: &SessionId) -> Result<OccupancyToken, BookingError> {
        // the write lock makes check-and-increment one indivisible step
        let mut sessions = self.sessions.write().await;

        let session = sessions
            .get(session_id)
            .ok_or(BookingError::SessionNotFound(*session_id))?;
        if !session.status().is_bookable() {
            return Err(BookingError::SessionNotFound(*session_id));
        }
        if session.is_full() {
            return Err(BookingError::CapacityExceeded(*session_id));
        }

        let occupied = Self::with_confirmed_count(session, session.confirmed_count() + 1);
        sessions.insert(*session_id, occupied);
        Ok(OccupancyToken::new(*session_id))
    }

    async fn release(&self, session_id: &SessionId) -> Result<bool, BookingError> {
        let mut sessions = self.sessions.write().await;

        let Some(session) = sessions.get(session_id) else {
            return Ok(false);
        };
        if session.confirmed_count() == 0 {
            return Ok(false);
        }

        let released = Self::with_confirmed_count(session, session.confirmed_count() - 1);
        sessions.insert(*session_id, released);
        Ok(true)
    }
}
