//! MaterializeSessionHandler - expands a weekly template into a
//! concrete, dated session.
//!
//! Materialization is idempotent: the same (template, date) pair
//! always resolves to the same session. A lost save race against a
//! concurrent materialization recovers by returning the winner's row.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{ErrorCode, SessionId, TemplateId, TrainerId};
use crate::domain::session::{ScheduleError, Session};
use crate::ports::{AccessChecker, AccessResult, AvailabilityRepository, SessionRepository};
use chrono::NaiveDate;

/// Command to materialize a session from a template.
#[derive(Debug, Clone)]
pub struct MaterializeSessionCommand {
    pub trainer_id: TrainerId,
    pub template_id: TemplateId,
    pub date: NaiveDate,
}

/// Handler for template materialization.
pub struct MaterializeSessionHandler {
    templates: Arc<dyn AvailabilityRepository>,
    sessions: Arc<dyn SessionRepository>,
    access_checker: Arc<dyn AccessChecker>,
    /// Capacity assigned to newly materialized sessions (configured,
    /// never hardcoded).
    default_capacity: u32,
}

impl MaterializeSessionHandler {
    pub fn new(
        templates: Arc<dyn AvailabilityRepository>,
        sessions: Arc<dyn SessionRepository>,
        access_checker: Arc<dyn AccessChecker>,
        default_capacity: u32,
    ) -> Self {
        Self {
            templates,
            sessions,
            access_checker,
            default_capacity,
        }
    }

    pub async fn handle(&self, cmd: MaterializeSessionCommand) -> Result<Session, ScheduleError> {
        match self.access_checker.can_manage_schedule(&cmd.trainer_id).await? {
            AccessResult::Allowed => {}
            AccessResult::Denied(_) => return Err(ScheduleError::Forbidden),
        }

        let template = self
            .templates
            .find_by_id(&cmd.template_id)
            .await?
            .ok_or(ScheduleError::TemplateNotFound(cmd.template_id))?;
        if !template.is_owned_by(&cmd.trainer_id) {
            return Err(ScheduleError::Forbidden);
        }
        if !template.matches_date(cmd.date) {
            return Err(ScheduleError::invalid_date(template.day_of_week(), cmd.date));
        }

        // idempotency probe: same (template, date) resolves to the same row
        if let Some(existing) = self
            .sessions
            .find_by_template_and_date(&cmd.template_id, cmd.date)
            .await?
        {
            debug!(
                template_id = %cmd.template_id,
                date = %cmd.date,
                session_id = %existing.id(),
                "materialization already done"
            );
            return Ok(existing);
        }

        let session =
            Session::from_template(SessionId::new(), &template, cmd.date, self.default_capacity)?;

        match self.sessions.save(&session).await {
            Ok(()) => Ok(session),
            Err(err) if err.code == ErrorCode::DuplicateSession => {
                // lost the race against a concurrent materialization,
                // or the slot is taken by another template or an ad hoc
                // session
                self.sessions
                    .find_by_template_and_date(&cmd.template_id, cmd.date)
                    .await?
                    .ok_or(ScheduleError::Duplicate(err.message))
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::access::StubAccessChecker;
    use crate::adapters::memory::{InMemoryAvailabilityRepository, InMemorySessionStore};
    use crate::domain::availability::AvailabilityTemplate;
    use crate::domain::foundation::{DayOfWeek, TimeRange};
    use chrono::NaiveTime;

    struct Fixture {
        templates: Arc<InMemoryAvailabilityRepository>,
        handler: MaterializeSessionHandler,
    }

    fn fixture() -> Fixture {
        let templates = Arc::new(InMemoryAvailabilityRepository::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let handler = MaterializeSessionHandler::new(
            Arc::clone(&templates) as Arc<dyn AvailabilityRepository>,
            sessions as Arc<dyn SessionRepository>,
            Arc::new(StubAccessChecker::new()),
            8,
        );
        Fixture { templates, handler }
    }

    async fn monday_template(f: &Fixture, trainer_id: TrainerId) -> AvailabilityTemplate {
        let template = AvailabilityTemplate::new(
            TemplateId::new(),
            trainer_id,
            DayOfWeek::Mon,
            TimeRange::new(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            )
            .unwrap(),
        );
        f.templates.save(&template).await.unwrap();
        template
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[tokio::test]
    async fn materializes_with_configured_capacity() {
        let f = fixture();
        let trainer_id = TrainerId::new();
        let template = monday_template(&f, trainer_id).await;

        let session = f
            .handler
            .handle(MaterializeSessionCommand {
                trainer_id,
                template_id: *template.id(),
                date: monday(),
            })
            .await
            .unwrap();

        assert_eq!(session.capacity(), 8);
        assert_eq!(session.window(), template.window());
        assert_eq!(session.source_template_id(), Some(template.id()));
    }

    #[tokio::test]
    async fn materializing_twice_returns_the_same_session() {
        let f = fixture();
        let trainer_id = TrainerId::new();
        let template = monday_template(&f, trainer_id).await;
        let cmd = MaterializeSessionCommand {
            trainer_id,
            template_id: *template.id(),
            date: monday(),
        };

        let first = f.handler.handle(cmd.clone()).await.unwrap();
        let second = f.handler.handle(cmd).await.unwrap();

        assert_eq!(first.id(), second.id());
    }

    #[tokio::test]
    async fn weekday_mismatch_is_an_invalid_date() {
        let f = fixture();
        let trainer_id = TrainerId::new();
        let template = monday_template(&f, trainer_id).await;
        let tuesday = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();

        let result = f
            .handler
            .handle(MaterializeSessionCommand {
                trainer_id,
                template_id: *template.id(),
                date: tuesday,
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::InvalidDate { .. })));
    }

    #[tokio::test]
    async fn foreign_template_is_forbidden() {
        let f = fixture();
        let template = monday_template(&f, TrainerId::new()).await;

        let result = f
            .handler
            .handle(MaterializeSessionCommand {
                trainer_id: TrainerId::new(),
                template_id: *template.id(),
                date: monday(),
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::Forbidden)));
    }

    #[tokio::test]
    async fn unknown_template_is_not_found() {
        let f = fixture();

        let result = f
            .handler
            .handle(MaterializeSessionCommand {
                trainer_id: TrainerId::new(),
                template_id: TemplateId::new(),
                date: monday(),
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::TemplateNotFound(_))));
    }
}
