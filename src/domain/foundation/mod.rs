//! Shared value objects and error types used across the domain.

mod errors;
mod ids;
mod time;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ClientId, PaymentId, ReservationId, SessionId, TemplateId, TrainerId};
pub use time::{DayOfWeek, TimeRange};
pub use timestamp::Timestamp;
