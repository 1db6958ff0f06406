//! Error-to-transport mapping, done exactly once.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::ErrorCode;

/// JSON error body shared by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Renders a tagged domain error as an HTTP response.
pub fn error_response(code: ErrorCode, message: impl Into<String>) -> Response {
    (
        status_for(code),
        Json(ErrorResponse {
            error: code.to_string(),
            message: message.into(),
        }),
    )
        .into_response()
}

/// Renders a malformed-request rejection.
pub fn bad_request(message: impl Into<String>) -> Response {
    error_response(ErrorCode::InvalidFormat, message)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::TemplateNotFound
        | ErrorCode::SessionNotFound
        | ErrorCode::ReservationNotFound => StatusCode::NOT_FOUND,

        ErrorCode::CapacityExceeded
        | ErrorCode::ScheduleConflict
        | ErrorCode::DuplicateSession
        | ErrorCode::SessionOccupied => StatusCode::CONFLICT,

        ErrorCode::InvalidDate
        | ErrorCode::InvalidStateTransition
        | ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,

        ErrorCode::Forbidden => StatusCode::FORBIDDEN,

        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
