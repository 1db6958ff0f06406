//! UpdateCapacityHandler - raises or lowers a session's capacity.
//!
//! Capacity can never drop below the occupancy already held; the
//! repository re-checks the bound against the stored counter so a
//! racing occupy cannot slip under a concurrent lowering.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, TrainerId};
use crate::domain::session::{ScheduleError, Session};
use crate::ports::SessionRepository;

/// Command to change a session's capacity.
#[derive(Debug, Clone)]
pub struct UpdateCapacityCommand {
    pub session_id: SessionId,
    pub trainer_id: TrainerId,
    pub capacity: u32,
}

/// Handler for capacity adjustments.
pub struct UpdateCapacityHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl UpdateCapacityHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: UpdateCapacityCommand) -> Result<Session, ScheduleError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(ScheduleError::NotFound(cmd.session_id))?;
        session.authorize(&cmd.trainer_id)?;

        session.set_capacity(cmd.capacity)?;
        self.sessions.update(&session).await?;

        Ok(session)
    }
}
