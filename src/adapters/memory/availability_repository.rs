//! In-memory availability template repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::availability::AvailabilityTemplate;
use crate::domain::foundation::{DomainError, ErrorCode, TemplateId, TrainerId};
use crate::ports::AvailabilityRepository;

/// In-memory implementation of [`AvailabilityRepository`].
#[derive(Debug, Default)]
pub struct InMemoryAvailabilityRepository {
    templates: Arc<RwLock<HashMap<TemplateId, AvailabilityTemplate>>>,
}

impl InMemoryAvailabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AvailabilityRepository for InMemoryAvailabilityRepository {
    async fn save(&self, template: &AvailabilityTemplate) -> Result<(), DomainError> {
        let mut templates = self.templates.write().await;
        templates.insert(*template.id(), template.clone());
        Ok(())
    }

    async fn update(&self, template: &AvailabilityTemplate) -> Result<(), DomainError> {
        let mut templates = self.templates.write().await;
        if !templates.contains_key(template.id()) {
            return Err(DomainError::new(
                ErrorCode::TemplateNotFound,
                format!("Template not found: {}", template.id()),
            ));
        }
        templates.insert(*template.id(), template.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &TemplateId,
    ) -> Result<Option<AvailabilityTemplate>, DomainError> {
        Ok(self.templates.read().await.get(id).cloned())
    }

    async fn find_by_trainer(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Vec<AvailabilityTemplate>, DomainError> {
        let templates = self.templates.read().await;
        let mut matching: Vec<AvailabilityTemplate> = templates
            .values()
            .filter(|t| t.trainer_id() == trainer_id)
            .cloned()
            .collect();
        matching.sort_by_key(|t| (t.day_of_week() as u8, t.window().start()));
        Ok(matching)
    }

    async fn delete(&self, id: &TemplateId) -> Result<(), DomainError> {
        let mut templates = self.templates.write().await;
        if templates.remove(id).is_none() {
            return Err(DomainError::new(
                ErrorCode::TemplateNotFound,
                format!("Template not found: {}", id),
            ));
        }
        Ok(())
    }
}
