//! Availability-template error types.

use crate::domain::foundation::{DomainError, ErrorCode, TemplateId, ValidationError};

/// Errors raised by availability-template operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    /// Template was not found.
    NotFound(TemplateId),
    /// Trainer is not the owner of the template.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl AvailabilityError {
    pub fn not_found(id: TemplateId) -> Self {
        AvailabilityError::NotFound(id)
    }

    pub fn forbidden() -> Self {
        AvailabilityError::Forbidden
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AvailabilityError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AvailabilityError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AvailabilityError::NotFound(_) => ErrorCode::TemplateNotFound,
            AvailabilityError::Forbidden => ErrorCode::Forbidden,
            AvailabilityError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AvailabilityError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl std::fmt::Display for AvailabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityError::NotFound(id) => write!(f, "Availability template not found: {}", id),
            AvailabilityError::Forbidden => write!(f, "Permission denied"),
            AvailabilityError::ValidationFailed { field, message } => {
                write!(f, "Validation failed for '{}': {}", field, message)
            }
            AvailabilityError::Infrastructure(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for AvailabilityError {}

impl From<ValidationError> for AvailabilityError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        AvailabilityError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for AvailabilityError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => AvailabilityError::Forbidden,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => AvailabilityError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => AvailabilityError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        assert_eq!(
            AvailabilityError::not_found(TemplateId::new()).code(),
            ErrorCode::TemplateNotFound
        );
        assert_eq!(AvailabilityError::forbidden().code(), ErrorCode::Forbidden);
    }

    #[test]
    fn validation_error_carries_field() {
        let err: AvailabilityError = ValidationError::invalid_format("time_range", "bad").into();
        assert!(matches!(
            err,
            AvailabilityError::ValidationFailed { ref field, .. } if field == "time_range"
        ));
    }
}
