//! HTTP DTOs for reservation endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, SessionId};
use crate::domain::reservation::{Reservation, ReservationStatus};

/// Request to create a reservation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationRequest {
    pub client_id: ClientId,
    pub session_id: SessionId,
    /// Optional initial status; `PENDIENTE` or `CONFIRMADA`.
    #[serde(default)]
    pub status: Option<ReservationStatus>,
}

/// Request to set a reservation's status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatus,
}

/// Reservation view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationResponse {
    pub id: String,
    pub client_id: String,
    pub session_id: String,
    pub status: ReservationStatus,
    pub created_at: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id().to_string(),
            client_id: reservation.client_id().to_string(),
            session_id: reservation.session_id().to_string(),
            status: reservation.status(),
            created_at: reservation.created_at().as_datetime().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ReservationId;

    #[test]
    fn response_serializes_spanish_status() {
        let reservation = Reservation::new(
            ReservationId::new(),
            ClientId::new(),
            SessionId::new(),
            ReservationStatus::Confirmada,
        )
        .unwrap();
        let response = ReservationResponse::from(reservation);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"CONFIRMADA\""));
    }

    #[test]
    fn create_request_accepts_missing_status() {
        let json = format!(
            "{{\"client_id\":\"{}\",\"session_id\":\"{}\"}}",
            uuid::Uuid::nil(),
            uuid::Uuid::nil()
        );
        let request: CreateReservationRequest = serde_json::from_str(&json).unwrap();
        assert!(request.status.is_none());
    }
}
