//! Session aggregate entity.
//!
//! A session is a concrete, dated, capacity-bounded slot a client can
//! book, either materialized from a weekly availability template or
//! published ad hoc by the trainer.
//!
//! # Ownership
//!
//! `confirmed_count` is owned by the persistence-side capacity ledger;
//! the aggregate carries it as a read-only snapshot and never
//! increments or decrements it itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::availability::AvailabilityTemplate;
use crate::domain::foundation::{
    SessionId, TemplateId, TimeRange, Timestamp, TrainerId, ValidationError,
};

use super::{ScheduleError, SessionStatus};

/// Upper bound for a single session's capacity.
pub const MAX_CAPACITY: u32 = 500;

/// Concrete, dated training slot with bounded capacity.
///
/// # Invariants
///
/// - `capacity >= 1`
/// - `confirmed_count <= capacity`
/// - `window` is a valid half-open interval
/// - closed sessions accept no new reservations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    trainer_id: TrainerId,

    /// Template this slot was materialized from; `None` for ad hoc slots.
    source_template_id: Option<TemplateId>,

    date: NaiveDate,
    window: TimeRange,

    capacity: u32,

    /// Snapshot of the ledger-owned occupancy counter.
    confirmed_count: u32,

    status: SessionStatus,

    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Publish an ad hoc session.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if capacity is zero or above [`MAX_CAPACITY`]
    pub fn publish(
        id: SessionId,
        trainer_id: TrainerId,
        date: NaiveDate,
        window: TimeRange,
        capacity: u32,
    ) -> Result<Self, ValidationError> {
        Self::validate_capacity(capacity)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            trainer_id,
            source_template_id: None,
            date,
            window,
            capacity,
            confirmed_count: 0,
            status: SessionStatus::Open,
            created_at: now,
            updated_at: now,
        })
    }

    /// Materialize a session from a weekly template for a concrete date.
    ///
    /// The window is copied verbatim from the template.
    ///
    /// # Errors
    ///
    /// - `InvalidDate` if the date's weekday does not match the template
    /// - `ValidationFailed` if capacity is out of range
    pub fn from_template(
        id: SessionId,
        template: &AvailabilityTemplate,
        date: NaiveDate,
        capacity: u32,
    ) -> Result<Self, ScheduleError> {
        if !template.matches_date(date) {
            return Err(ScheduleError::invalid_date(template.day_of_week(), date));
        }
        Self::validate_capacity(capacity)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            trainer_id: *template.trainer_id(),
            source_template_id: Some(*template.id()),
            date,
            window: template.window(),
            capacity,
            confirmed_count: 0,
            status: SessionStatus::Open,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        trainer_id: TrainerId,
        source_template_id: Option<TemplateId>,
        date: NaiveDate,
        window: TimeRange,
        capacity: u32,
        confirmed_count: u32,
        status: SessionStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            trainer_id,
            source_template_id,
            date,
            window,
            capacity,
            confirmed_count,
            status,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn trainer_id(&self) -> &TrainerId {
        &self.trainer_id
    }

    pub fn source_template_id(&self) -> Option<&TemplateId> {
        self.source_template_id.as_ref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn window(&self) -> TimeRange {
        self.window
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Count of non-cancelled reservations held against this session.
    pub fn confirmed_count(&self) -> u32 {
        self.confirmed_count
    }

    /// Remaining bookable units.
    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.confirmed_count)
    }

    pub fn is_full(&self) -> bool {
        self.confirmed_count >= self.capacity
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Checks if the given trainer owns this session.
    pub fn is_owned_by(&self, trainer_id: &TrainerId) -> bool {
        &self.trainer_id == trainer_id
    }

    /// Validates that the trainer can manage this session.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the trainer is not the owner
    pub fn authorize(&self, trainer_id: &TrainerId) -> Result<(), ScheduleError> {
        if self.is_owned_by(trainer_id) {
            Ok(())
        } else {
            Err(ScheduleError::Forbidden)
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Change the session's capacity.
    ///
    /// # Errors
    ///
    /// - `AlreadyClosed` if the session is closed
    /// - `OutOfRange` if the new capacity is zero or above [`MAX_CAPACITY`]
    /// - `ValidationFailed` if the new capacity is below the current
    ///   occupancy
    pub fn set_capacity(&mut self, capacity: u32) -> Result<(), ScheduleError> {
        self.ensure_open()?;
        Self::validate_capacity(capacity)?;

        if capacity < self.confirmed_count {
            return Err(ScheduleError::validation(
                "capacity",
                format!(
                    "cannot be lowered below the {} reservations already held",
                    self.confirmed_count
                ),
            ));
        }

        self.capacity = capacity;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Withdraw the session from the catalog (soft close).
    ///
    /// # Errors
    ///
    /// - `Occupied` while any non-cancelled reservation remains
    /// - `AlreadyClosed` if already closed
    pub fn close(&mut self) -> Result<(), ScheduleError> {
        self.ensure_open()?;

        if self.confirmed_count > 0 {
            return Err(ScheduleError::occupied(self.id));
        }

        self.status = SessionStatus::Closed;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_open(&self) -> Result<(), ScheduleError> {
        if self.status.is_bookable() {
            Ok(())
        } else {
            Err(ScheduleError::AlreadyClosed(self.id))
        }
    }

    fn validate_capacity(capacity: u32) -> Result<(), ValidationError> {
        if capacity < 1 || capacity > MAX_CAPACITY {
            return Err(ValidationError::out_of_range(
                "capacity",
                1,
                i64::from(MAX_CAPACITY),
                i64::from(capacity),
            ));
        }
        Ok(())
    }
}
