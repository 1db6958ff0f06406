//! HTTP handlers for payment endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, error_response};
use crate::application::handlers::payment::{RecordPaymentCommand, RecordPaymentHandler};
use crate::domain::foundation::ReservationId;
use crate::domain::payment::PaymentError;

use super::dto::{PaymentResponse, RecordPaymentRequest};

/// Shared state for the payment routes.
#[derive(Clone)]
pub struct PaymentHandlers {
    record_handler: Arc<RecordPaymentHandler>,
}

impl PaymentHandlers {
    pub fn new(record_handler: Arc<RecordPaymentHandler>) -> Self {
        Self { record_handler }
    }
}

/// POST /api/payments - Record a payment against a reservation
pub async fn record_payment(
    State(handlers): State<PaymentHandlers>,
    Json(req): Json<RecordPaymentRequest>,
) -> Response {
    let cmd = RecordPaymentCommand {
        reservation_id: req.reservation_id,
        amount_cents: req.amount_cents,
        method: req.method,
        completed: req.completed,
    };

    match handlers.record_handler.handle(cmd).await {
        Ok(payment) => {
            (StatusCode::CREATED, Json(PaymentResponse::from(payment))).into_response()
        }
        Err(e) => handle_payment_error(e),
    }
}

/// GET /api/payments/reservation/:id - Payments for a reservation
pub async fn list_by_reservation(
    State(handlers): State<PaymentHandlers>,
    Path(reservation_id): Path<String>,
) -> Response {
    let Ok(reservation_id) = reservation_id.parse::<ReservationId>() else {
        return bad_request("Invalid reservation ID");
    };

    match handlers
        .record_handler
        .list_by_reservation(&reservation_id)
        .await
    {
        Ok(payments) => {
            let response: Vec<PaymentResponse> = payments.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_payment_error(e),
    }
}

fn handle_payment_error(error: PaymentError) -> Response {
    error_response(error.code(), error.to_string())
}
