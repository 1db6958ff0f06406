//! Session-management error types.

use chrono::NaiveDate;

use crate::domain::foundation::{
    DayOfWeek, DomainError, ErrorCode, SessionId, TemplateId, ValidationError,
};

/// Errors raised by session publication and management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Session was not found.
    NotFound(SessionId),
    /// Source template was not found.
    TemplateNotFound(TemplateId),
    /// Materialization date does not fall on the template's weekday.
    InvalidDate {
        expected: DayOfWeek,
        date: NaiveDate,
    },
    /// A session for the same slot already exists.
    Duplicate(String),
    /// Session still holds non-cancelled reservations.
    Occupied(SessionId),
    /// Session is already closed.
    AlreadyClosed(SessionId),
    /// Trainer is not the owner of the session.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ScheduleError {
    pub fn not_found(id: SessionId) -> Self {
        ScheduleError::NotFound(id)
    }

    pub fn template_not_found(id: TemplateId) -> Self {
        ScheduleError::TemplateNotFound(id)
    }

    pub fn invalid_date(expected: DayOfWeek, date: NaiveDate) -> Self {
        ScheduleError::InvalidDate { expected, date }
    }

    pub fn occupied(id: SessionId) -> Self {
        ScheduleError::Occupied(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ScheduleError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ScheduleError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ScheduleError::NotFound(_) => ErrorCode::SessionNotFound,
            ScheduleError::TemplateNotFound(_) => ErrorCode::TemplateNotFound,
            ScheduleError::InvalidDate { .. } => ErrorCode::InvalidDate,
            ScheduleError::Duplicate(_) => ErrorCode::DuplicateSession,
            ScheduleError::Occupied(_) => ErrorCode::SessionOccupied,
            ScheduleError::AlreadyClosed(_) => ErrorCode::InvalidStateTransition,
            ScheduleError::Forbidden => ErrorCode::Forbidden,
            ScheduleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ScheduleError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::NotFound(id) => write!(f, "Session not found: {}", id),
            ScheduleError::TemplateNotFound(id) => write!(f, "Template not found: {}", id),
            ScheduleError::InvalidDate { expected, date } => write!(
                f,
                "Date {} does not fall on the template's weekday {}",
                date, expected
            ),
            ScheduleError::Duplicate(msg) => write!(f, "Duplicate session: {}", msg),
            ScheduleError::Occupied(id) => {
                write!(f, "Session {} still holds active reservations", id)
            }
            ScheduleError::AlreadyClosed(id) => write!(f, "Session {} is already closed", id),
            ScheduleError::Forbidden => write!(f, "Permission denied"),
            ScheduleError::ValidationFailed { field, message } => {
                write!(f, "Validation failed for '{}': {}", field, message)
            }
            ScheduleError::Infrastructure(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for ScheduleError {}

impl From<ValidationError> for ScheduleError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        ScheduleError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ScheduleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateSession => ScheduleError::Duplicate(err.message),
            ErrorCode::Forbidden => ScheduleError::Forbidden,
            // a concurrent occupy slipped in between load and write
            ErrorCode::SessionOccupied => ScheduleError::ValidationFailed {
                field: "session".to_string(),
                message: err.message,
            },
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ScheduleError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ScheduleError::Infrastructure(err.to_string()),
        }
    }
}
