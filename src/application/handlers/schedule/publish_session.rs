//! PublishSessionHandler - publishes an ad hoc session with no
//! backing template.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::foundation::{SessionId, TimeRange, TrainerId};
use crate::domain::session::{ScheduleError, Session};
use crate::ports::{AccessChecker, AccessResult, SessionRepository};

/// Command to publish an ad hoc session.
#[derive(Debug, Clone)]
pub struct PublishSessionCommand {
    pub trainer_id: TrainerId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Capacity; defaults to the configured booking policy.
    pub capacity: Option<u32>,
}

/// Handler for ad hoc session publication.
pub struct PublishSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    access_checker: Arc<dyn AccessChecker>,
    default_capacity: u32,
}

impl PublishSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        access_checker: Arc<dyn AccessChecker>,
        default_capacity: u32,
    ) -> Self {
        Self {
            sessions,
            access_checker,
            default_capacity,
        }
    }

    pub async fn handle(&self, cmd: PublishSessionCommand) -> Result<Session, ScheduleError> {
        match self.access_checker.can_manage_schedule(&cmd.trainer_id).await? {
            AccessResult::Allowed => {}
            AccessResult::Denied(_) => return Err(ScheduleError::Forbidden),
        }

        let window = TimeRange::new(cmd.start_time, cmd.end_time)?;

        if self
            .sessions
            .exists_for_slot(&cmd.trainer_id, cmd.date, &window)
            .await?
        {
            return Err(ScheduleError::Duplicate(format!(
                "session for {} {} already exists",
                cmd.date, window
            )));
        }

        let capacity = cmd.capacity.unwrap_or(self.default_capacity);
        let session = Session::publish(
            SessionId::new(),
            cmd.trainer_id,
            cmd.date,
            window,
            capacity,
        )?;

        self.sessions.save(&session).await?;
        Ok(session)
    }
}
