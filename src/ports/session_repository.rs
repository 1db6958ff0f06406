//! Session repository port (write side).
//!
//! Persists Session aggregates. The occupancy counter is out of reach
//! here on purpose: `save` writes it as zero, `update` never touches
//! it. All counter mutation goes through the capacity ledger.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, SessionId, TemplateId, TimeRange, TrainerId};
use crate::domain::session::Session;

/// Repository port for Session aggregate persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `DuplicateSession` if a session for the same slot already
    ///   exists (same source template and date, or same trainer, date
    ///   and window)
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Update an existing session's capacity and status.
    ///
    /// Implementations must leave `confirmed_count` untouched.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &Session) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Find the session materialized from a template for a date.
    ///
    /// This is the idempotency probe for materialization.
    async fn find_by_template_and_date(
        &self,
        template_id: &TemplateId,
        date: NaiveDate,
    ) -> Result<Option<Session>, DomainError>;

    /// Check whether a trainer already has a session occupying the
    /// exact slot.
    async fn exists_for_slot(
        &self,
        trainer_id: &TrainerId,
        date: NaiveDate,
        window: &TimeRange,
    ) -> Result<bool, DomainError>;

    /// List a trainer's open sessions, soonest first.
    async fn list_open_by_trainer(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Vec<Session>, DomainError>;
}
