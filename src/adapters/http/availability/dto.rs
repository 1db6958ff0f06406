//! HTTP DTOs for availability template endpoints.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::availability::AvailabilityTemplate;
use crate::domain::foundation::{DayOfWeek, TrainerId};

/// Request to create an availability template.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplateRequest {
    pub trainer_id: TrainerId,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Request to update an availability template.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTemplateRequest {
    pub trainer_id: TrainerId,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Request to delete an availability template.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteTemplateRequest {
    pub trainer_id: TrainerId,
}

/// Template view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateResponse {
    pub id: String,
    pub trainer_id: String,
    pub day_of_week: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
}

impl From<AvailabilityTemplate> for TemplateResponse {
    fn from(template: AvailabilityTemplate) -> Self {
        Self {
            id: template.id().to_string(),
            trainer_id: template.trainer_id().to_string(),
            day_of_week: template.day_of_week(),
            start_time: template.window().start().format("%H:%M").to_string(),
            end_time: template.window().end().format("%H:%M").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_parses_wire_day_and_times() {
        let json = format!(
            "{{\"trainer_id\":\"{}\",\"day_of_week\":\"WED\",\"start_time\":\"09:00:00\",\"end_time\":\"10:30:00\"}}",
            uuid::Uuid::nil()
        );
        let request: CreateTemplateRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.day_of_week, DayOfWeek::Wed);
        assert_eq!(request.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }
}
