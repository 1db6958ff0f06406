//! AvailabilityTemplate aggregate.
//!
//! A template declares a trainer's recurring weekly window (day of week
//! plus wall-clock bounds). Templates of the same trainer are allowed to
//! overlap each other; overlap resolution belongs to booking time, not
//! to the weekly declaration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DayOfWeek, TemplateId, TimeRange, Timestamp, TrainerId};

use super::AvailabilityError;

/// Recurring weekly availability window of a trainer.
///
/// # Invariants
///
/// - `window.start < window.end` (enforced by [`TimeRange`])
/// - identity is immutable; day and time bounds are mutable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityTemplate {
    id: TemplateId,
    trainer_id: TrainerId,
    day_of_week: DayOfWeek,
    window: TimeRange,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl AvailabilityTemplate {
    /// Creates a new template.
    pub fn new(
        id: TemplateId,
        trainer_id: TrainerId,
        day_of_week: DayOfWeek,
        window: TimeRange,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            trainer_id,
            day_of_week,
            window,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a template from persistence (no validation).
    pub fn reconstitute(
        id: TemplateId,
        trainer_id: TrainerId,
        day_of_week: DayOfWeek,
        window: TimeRange,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            trainer_id,
            day_of_week,
            window,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    pub fn trainer_id(&self) -> &TrainerId {
        &self.trainer_id
    }

    pub fn day_of_week(&self) -> DayOfWeek {
        self.day_of_week
    }

    pub fn window(&self) -> TimeRange {
        self.window
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Checks if the given trainer owns this template.
    pub fn is_owned_by(&self, trainer_id: &TrainerId) -> bool {
        &self.trainer_id == trainer_id
    }

    /// Validates that the trainer can modify this template.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the trainer is not the owner
    pub fn authorize(&self, trainer_id: &TrainerId) -> Result<(), AvailabilityError> {
        if self.is_owned_by(trainer_id) {
            Ok(())
        } else {
            Err(AvailabilityError::forbidden())
        }
    }

    /// Checks whether a calendar date falls on this template's weekday.
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.day_of_week.matches(date)
    }

    /// Moves the recurring window to a new day and/or time bounds.
    pub fn reschedule(&mut self, day_of_week: DayOfWeek, window: TimeRange) {
        self.day_of_week = day_of_week;
        self.window = window;
        self.updated_at = Timestamp::now();
    }
}
