//! CreateTemplateHandler - declares a recurring weekly window.

use std::sync::Arc;

use chrono::NaiveTime;

use crate::domain::availability::{AvailabilityError, AvailabilityTemplate};
use crate::domain::foundation::{DayOfWeek, TemplateId, TimeRange, TrainerId};
use crate::ports::{AccessChecker, AccessResult, AvailabilityRepository};

/// Command to create an availability template.
#[derive(Debug, Clone)]
pub struct CreateTemplateCommand {
    pub trainer_id: TrainerId,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Handler for creating availability templates.
pub struct CreateTemplateHandler {
    templates: Arc<dyn AvailabilityRepository>,
    access_checker: Arc<dyn AccessChecker>,
}

impl CreateTemplateHandler {
    pub fn new(
        templates: Arc<dyn AvailabilityRepository>,
        access_checker: Arc<dyn AccessChecker>,
    ) -> Self {
        Self {
            templates,
            access_checker,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateTemplateCommand,
    ) -> Result<AvailabilityTemplate, AvailabilityError> {
        match self.access_checker.can_manage_schedule(&cmd.trainer_id).await? {
            AccessResult::Allowed => {}
            AccessResult::Denied(_) => return Err(AvailabilityError::forbidden()),
        }

        let window = TimeRange::new(cmd.start_time, cmd.end_time)?;
        let template = AvailabilityTemplate::new(
            TemplateId::new(),
            cmd.trainer_id,
            cmd.day_of_week,
            window,
        );

        self.templates.save(&template).await?;
        Ok(template)
    }
}
