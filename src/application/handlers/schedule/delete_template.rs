//! DeleteTemplateHandler - removes a recurring window.
//!
//! Sessions already materialized from the template keep their
//! `source_template_id` and are unaffected; only future expansion
//! stops.

use std::sync::Arc;

use crate::domain::availability::AvailabilityError;
use crate::domain::foundation::{TemplateId, TrainerId};
use crate::ports::AvailabilityRepository;

/// Command to delete an availability template.
#[derive(Debug, Clone)]
pub struct DeleteTemplateCommand {
    pub template_id: TemplateId,
    pub trainer_id: TrainerId,
}

/// Handler for deleting availability templates.
pub struct DeleteTemplateHandler {
    templates: Arc<dyn AvailabilityRepository>,
}

impl DeleteTemplateHandler {
    pub fn new(templates: Arc<dyn AvailabilityRepository>) -> Self {
        Self { templates }
    }

    pub async fn handle(&self, cmd: DeleteTemplateCommand) -> Result<(), AvailabilityError> {
        let template = self
            .templates
            .find_by_id(&cmd.template_id)
            .await?
            .ok_or(AvailabilityError::NotFound(cmd.template_id))?;
        template.authorize(&cmd.trainer_id)?;

        self.templates.delete(&cmd.template_id).await?;
        Ok(())
    }
}
