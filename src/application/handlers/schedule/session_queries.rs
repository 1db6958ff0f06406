//! Read paths for sessions.
//!
//! The catalog reads `confirmed_count`/`capacity` from here to show
//! remaining slots.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, TrainerId};
use crate::domain::session::{ScheduleError, Session};
use crate::ports::SessionRepository;

/// Query handler for session lookups.
pub struct SessionQueryHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl SessionQueryHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    /// Fetch one session.
    pub async fn get(&self, session_id: &SessionId) -> Result<Session, ScheduleError> {
        self.sessions
            .find_by_id(session_id)
            .await?
            .ok_or(ScheduleError::NotFound(*session_id))
    }

    /// A trainer's open sessions, soonest first.
    pub async fn list_open_by_trainer(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Vec<Session>, ScheduleError> {
        Ok(self.sessions.list_open_by_trainer(trainer_id).await?)
    }
}
