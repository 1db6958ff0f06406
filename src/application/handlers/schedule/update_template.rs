//! UpdateTemplateHandler - moves a recurring window.

use std::sync::Arc;

use chrono::NaiveTime;

use crate::domain::availability::{AvailabilityError, AvailabilityTemplate};
use crate::domain::foundation::{DayOfWeek, TemplateId, TimeRange, TrainerId};
use crate::ports::AvailabilityRepository;

/// Command to update an availability template.
#[derive(Debug, Clone)]
pub struct UpdateTemplateCommand {
    pub template_id: TemplateId,
    pub trainer_id: TrainerId,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Handler for updating availability templates.
pub struct UpdateTemplateHandler {
    templates: Arc<dyn AvailabilityRepository>,
}

impl UpdateTemplateHandler {
    pub fn new(templates: Arc<dyn AvailabilityRepository>) -> Self {
        Self { templates }
    }

    pub async fn handle(
        &self,
        cmd: UpdateTemplateCommand,
    ) -> Result<AvailabilityTemplate, AvailabilityError> {
        let mut template = self
            .templates
            .find_by_id(&cmd.template_id)
            .await?
            .ok_or(AvailabilityError::NotFound(cmd.template_id))?;
        template.authorize(&cmd.trainer_id)?;

        let window = TimeRange::new(cmd.start_time, cmd.end_time)?;
        template.reschedule(cmd.day_of_week, window);

        self.templates.update(&template).await?;
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAvailabilityRepository;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    async fn stored_template(
        repo: &InMemoryAvailabilityRepository,
        trainer_id: TrainerId,
    ) -> AvailabilityTemplate {
        let template = AvailabilityTemplate::new(
            TemplateId::new(),
            trainer_id,
            DayOfWeek::Mon,
            TimeRange::new(t(9, 0), t(10, 0)).unwrap(),
        );
        repo.save(&template).await.unwrap();
        template
    }

    #[tokio::test]
    async fn reschedules_day_and_window() {
        let repo = Arc::new(InMemoryAvailabilityRepository::new());
        let handler =
            UpdateTemplateHandler::new(Arc::clone(&repo) as Arc<dyn AvailabilityRepository>);
        let trainer_id = TrainerId::new();
        let template = stored_template(&repo, trainer_id).await;

        let updated = handler
            .handle(UpdateTemplateCommand {
                template_id: *template.id(),
                trainer_id,
                day_of_week: DayOfWeek::Sat,
                start_time: t(8, 0),
                end_time: t(9, 30),
            })
            .await
            .unwrap();

        assert_eq!(updated.day_of_week(), DayOfWeek::Sat);
        assert_eq!(
            repo.find_by_id(template.id()).await.unwrap().unwrap(),
            updated
        );
    }

    #[tokio::test]
    async fn non_owner_cannot_update() {
        let repo = Arc::new(InMemoryAvailabilityRepository::new());
        let handler =
            UpdateTemplateHandler::new(Arc::clone(&repo) as Arc<dyn AvailabilityRepository>);
        let template = stored_template(&repo, TrainerId::new()).await;

        let result = handler
            .handle(UpdateTemplateCommand {
                template_id: *template.id(),
                trainer_id: TrainerId::new(),
                day_of_week: DayOfWeek::Sun,
                start_time: t(8, 0),
                end_time: t(9, 0),
            })
            .await;

        assert!(matches!(result, Err(AvailabilityError::Forbidden)));
    }

    #[tokio::test]
    async fn unknown_template_is_not_found() {
        let repo = Arc::new(InMemoryAvailabilityRepository::new());
        let handler = UpdateTemplateHandler::new(repo as Arc<dyn AvailabilityRepository>);

        let result = handler
            .handle(UpdateTemplateCommand {
                template_id: TemplateId::new(),
                trainer_id: TrainerId::new(),
                day_of_week: DayOfWeek::Sun,
                start_time: t(8, 0),
                end_time: t(9, 0),
            })
            .await;

        assert!(matches!(result, Err(AvailabilityError::NotFound(_))));
    }
}
