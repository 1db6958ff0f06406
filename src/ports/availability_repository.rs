//! Availability template repository port.

use async_trait::async_trait;

use crate::domain::availability::AvailabilityTemplate;
use crate::domain::foundation::{DomainError, TemplateId, TrainerId};

/// Repository port for AvailabilityTemplate persistence.
///
/// Templates are the persisted feed the materializer expands; unlike
/// sessions they may be hard-deleted, since no reservation references
/// them directly.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Save a new template.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, template: &AvailabilityTemplate) -> Result<(), DomainError>;

    /// Update an existing template's day and window.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if the template doesn't exist
    async fn update(&self, template: &AvailabilityTemplate) -> Result<(), DomainError>;

    /// Find a template by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &TemplateId)
        -> Result<Option<AvailabilityTemplate>, DomainError>;

    /// All templates of a trainer, ordered by day of week then start.
    async fn find_by_trainer(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Vec<AvailabilityTemplate>, DomainError>;

    /// Delete a template.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if the template doesn't exist
    async fn delete(&self, id: &TemplateId) -> Result<(), DomainError>;
}
