//! CloseSessionHandler - withdraws a session from the catalog.
//!
//! Withdrawal is a soft close and is refused while any non-cancelled
//! reservation remains.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, TrainerId};
use crate::domain::session::ScheduleError;
use crate::ports::SessionRepository;

/// Command to close a session.
#[derive(Debug, Clone)]
pub struct CloseSessionCommand {
    pub session_id: SessionId,
    pub trainer_id: TrainerId,
}

/// Handler for closing sessions.
pub struct CloseSessionHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl CloseSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: CloseSessionCommand) -> Result<(), ScheduleError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(ScheduleError::NotFound(cmd.session_id))?;
        session.authorize(&cmd.trainer_id)?;

        session.close()?;
        self.sessions.update(&session).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::domain::foundation::TimeRange;
    use crate::domain::session::{Session, SessionStatus};
    use crate::ports::CapacityLedger;
    use chrono::{NaiveDate, NaiveTime};

    async fn stored_session(store: &InMemorySessionStore) -> Session {
        let session = Session::publish(
            SessionId::new(),
            TrainerId::new(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            TimeRange::new(
                NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            )
            .unwrap(),
            3,
        )
        .unwrap();
        store.save(&session).await.unwrap();
        session
    }

    #[tokio::test]
    async fn closes_an_empty_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = CloseSessionHandler::new(Arc::clone(&store) as Arc<dyn SessionRepository>);
        let session = stored_session(&store).await;

        handler
            .handle(CloseSessionCommand {
                session_id: *session.id(),
                trainer_id: *session.trainer_id(),
            })
            .await
            .unwrap();

        let stored = store.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), SessionStatus::Closed);
    }

    #[tokio::test]
    async fn refuses_to_close_while_occupied() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = CloseSessionHandler::new(Arc::clone(&store) as Arc<dyn SessionRepository>);
        let session = stored_session(&store).await;
        store.try_occupy(session.id()).await.unwrap();

        let result = handler
            .handle(CloseSessionCommand {
                session_id: *session.id(),
                trainer_id: *session.trainer_id(),
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::Occupied(_))));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = CloseSessionHandler::new(store as Arc<dyn SessionRepository>);

        let result = handler
            .handle(CloseSessionCommand {
                session_id: SessionId::new(),
                trainer_id: TrainerId::new(),
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::NotFound(_))));
    }
}
