//! Capability check port.
//!
//! Authentication and role mechanics live outside this crate; by the
//! time the engine runs, the caller's identity has been established.
//! This port only answers whether that identity may perform the
//! operation.

use async_trait::async_trait;

use crate::domain::foundation::{ClientId, DomainError, TrainerId};

/// Result of a capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessResult {
    /// Access is granted.
    Allowed,
    /// Access is denied with a specific reason.
    Denied(String),
}

/// Port for checking caller capabilities.
#[async_trait]
pub trait AccessChecker: Send + Sync {
    /// Check if the client may create reservations.
    async fn can_book(&self, client_id: &ClientId) -> Result<AccessResult, DomainError>;

    /// Check if the trainer may manage templates and sessions.
    async fn can_manage_schedule(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<AccessResult, DomainError>;
}
