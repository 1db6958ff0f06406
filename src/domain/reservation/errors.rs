//! Booking-engine error taxonomy.
//!
//! Every rejection the engine can produce is a tagged variant here;
//! the HTTP adapter maps codes to transport statuses exactly once.

use chrono::NaiveDate;

use crate::domain::foundation::{
    DomainError, ErrorCode, ReservationId, SessionId, TimeRange, ValidationError,
};

use super::ReservationStatus;

/// Errors raised by reservation operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Target session does not exist (or was withdrawn).
    SessionNotFound(SessionId),
    /// Reservation does not exist.
    NotFound(ReservationId),
    /// Session is full at occupancy attempt.
    CapacityExceeded(SessionId),
    /// Client already holds an overlapping reservation.
    ScheduleConflict {
        date: NaiveDate,
        window: TimeRange,
    },
    /// Requested status change is illegal from the current state.
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },
    /// Caller is not allowed to book.
    AccessDenied(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl BookingError {
    pub fn session_not_found(id: SessionId) -> Self {
        BookingError::SessionNotFound(id)
    }

    pub fn not_found(id: ReservationId) -> Self {
        BookingError::NotFound(id)
    }

    pub fn capacity_exceeded(id: SessionId) -> Self {
        BookingError::CapacityExceeded(id)
    }

    pub fn schedule_conflict(date: NaiveDate, window: TimeRange) -> Self {
        BookingError::ScheduleConflict { date, window }
    }

    pub fn invalid_transition(from: ReservationStatus, to: ReservationStatus) -> Self {
        BookingError::InvalidTransition { from, to }
    }

    pub fn access_denied(reason: impl Into<String>) -> Self {
        BookingError::AccessDenied(reason.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            BookingError::NotFound(_) => ErrorCode::ReservationNotFound,
            BookingError::CapacityExceeded(_) => ErrorCode::CapacityExceeded,
            BookingError::ScheduleConflict { .. } => ErrorCode::ScheduleConflict,
            BookingError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            BookingError::AccessDenied(_) => ErrorCode::Forbidden,
            BookingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            BookingError::NotFound(id) => write!(f, "Reservation not found: {}", id),
            BookingError::CapacityExceeded(id) => {
                write!(f, "Session {} has no remaining capacity", id)
            }
            BookingError::ScheduleConflict { date, window } => write!(
                f,
                "Client already holds a reservation overlapping {} on {}",
                window, date
            ),
            BookingError::InvalidTransition { from, to } => {
                write!(f, "Cannot transition reservation from {} to {}", from, to)
            }
            BookingError::AccessDenied(reason) => write!(f, "Access denied: {}", reason),
            BookingError::ValidationFailed { field, message } => {
                write!(f, "Validation failed for '{}': {}", field, message)
            }
            BookingError::Infrastructure(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BookingError {}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        BookingError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => BookingError::AccessDenied(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => BookingError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => BookingError::Infrastructure(err.to_string()),
        }
    }
}
