//! HTTP DTOs for session endpoints.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TemplateId, TrainerId};
use crate::domain::session::{Session, SessionStatus};

/// Request to publish an ad hoc session.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishSessionRequest {
    pub trainer_id: TrainerId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// Request to materialize a session from a template.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterializeSessionRequest {
    pub trainer_id: TrainerId,
    pub template_id: TemplateId,
    pub date: NaiveDate,
}

/// Request to change a session's capacity.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCapacityRequest {
    pub trainer_id: TrainerId,
    pub capacity: u32,
}

/// Request to close a session.
#[derive(Debug, Clone, Deserialize)]
pub struct CloseSessionRequest {
    pub trainer_id: TrainerId,
}

/// Session view for API responses, including remaining slots for the
/// catalog.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub trainer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_template_id: Option<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub capacity: u32,
    pub confirmed_count: u32,
    pub remaining: u32,
    pub status: SessionStatus,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id().to_string(),
            trainer_id: session.trainer_id().to_string(),
            source_template_id: session.source_template_id().map(ToString::to_string),
            date: session.date(),
            start_time: session.window().start().format("%H:%M").to_string(),
            end_time: session.window().end().format("%H:%M").to_string(),
            capacity: session.capacity(),
            confirmed_count: session.confirmed_count(),
            remaining: session.remaining(),
            status: session.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SessionId, TimeRange};

    #[test]
    fn response_exposes_remaining_slots() {
        let session = Session::publish(
            SessionId::new(),
            TrainerId::new(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            TimeRange::new(
                NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            )
            .unwrap(),
            5,
        )
        .unwrap();

        let response = SessionResponse::from(session);
        assert_eq!(response.remaining, 5);
        assert_eq!(response.start_time, "10:00");
        assert!(response.source_template_id.is_none());
    }
}
