//! Payment error types.

use crate::domain::foundation::{DomainError, ErrorCode, ReservationId, ValidationError};

/// Errors raised when recording a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Target reservation does not exist.
    ReservationNotFound(ReservationId),
    /// Target reservation is cancelled and no longer payable.
    NotPayable(ReservationId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl PaymentError {
    pub fn reservation_not_found(id: ReservationId) -> Self {
        PaymentError::ReservationNotFound(id)
    }

    pub fn not_payable(id: ReservationId) -> Self {
        PaymentError::NotPayable(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::ReservationNotFound(_) => ErrorCode::ReservationNotFound,
            PaymentError::NotPayable(_) => ErrorCode::InvalidStateTransition,
            PaymentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PaymentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentError::ReservationNotFound(id) => {
                write!(f, "Reservation not found: {}", id)
            }
            PaymentError::NotPayable(id) => {
                write!(f, "Reservation {} is cancelled and not payable", id)
            }
            PaymentError::ValidationFailed { field, message } => {
                write!(f, "Validation failed for '{}': {}", field, message)
            }
            PaymentError::Infrastructure(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for PaymentError {}

impl From<ValidationError> for PaymentError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        PaymentError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        PaymentError::Infrastructure(err.to_string())
    }
}
