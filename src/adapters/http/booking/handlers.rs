//! HTTP handlers for reservation endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, error_response};
use crate::application::handlers::booking::{
    CancelReservationCommand, CancelReservationHandler, CreateReservationCommand,
    CreateReservationHandler, ListReservationsHandler, UpdateReservationStatusCommand,
    UpdateReservationStatusHandler,
};
use crate::domain::foundation::{ClientId, ReservationId, SessionId};
use crate::domain::reservation::BookingError;

use super::dto::{CreateReservationRequest, ReservationResponse, UpdateReservationStatusRequest};

/// Shared state for the reservation routes.
#[derive(Clone)]
pub struct BookingHandlers {
    create_handler: Arc<CreateReservationHandler>,
    update_status_handler: Arc<UpdateReservationStatusHandler>,
    cancel_handler: Arc<CancelReservationHandler>,
    list_handler: Arc<ListReservationsHandler>,
}

impl BookingHandlers {
    pub fn new(
        create_handler: Arc<CreateReservationHandler>,
        update_status_handler: Arc<UpdateReservationStatusHandler>,
        cancel_handler: Arc<CancelReservationHandler>,
        list_handler: Arc<ListReservationsHandler>,
    ) -> Self {
        Self {
            create_handler,
            update_status_handler,
            cancel_handler,
            list_handler,
        }
    }
}

/// POST /api/reservations - Book a session
pub async fn create_reservation(
    State(handlers): State<BookingHandlers>,
    Json(req): Json<CreateReservationRequest>,
) -> Response {
    let cmd = CreateReservationCommand {
        client_id: req.client_id,
        session_id: req.session_id,
        initial_status: req.status,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(reservation) => (
            StatusCode::CREATED,
            Json(ReservationResponse::from(reservation)),
        )
            .into_response(),
        Err(e) => handle_booking_error(e),
    }
}

/// PATCH /api/reservations/:id/status - Administrative status change
pub async fn update_reservation_status(
    State(handlers): State<BookingHandlers>,
    Path(reservation_id): Path<String>,
    Json(req): Json<UpdateReservationStatusRequest>,
) -> Response {
    let Ok(reservation_id) = reservation_id.parse::<ReservationId>() else {
        return bad_request("Invalid reservation ID");
    };

    let cmd = UpdateReservationStatusCommand {
        reservation_id,
        status: req.status,
    };

    match handlers.update_status_handler.handle(cmd).await {
        Ok(reservation) => {
            (StatusCode::OK, Json(ReservationResponse::from(reservation))).into_response()
        }
        Err(e) => handle_booking_error(e),
    }
}

/// DELETE /api/reservations/:id - Cancel a reservation
pub async fn cancel_reservation(
    State(handlers): State<BookingHandlers>,
    Path(reservation_id): Path<String>,
) -> Response {
    let Ok(reservation_id) = reservation_id.parse::<ReservationId>() else {
        return bad_request("Invalid reservation ID");
    };

    match handlers
        .cancel_handler
        .handle(CancelReservationCommand { reservation_id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_booking_error(e),
    }
}

/// GET /api/reservations/session/:id - Reservations against a session
pub async fn list_by_session(
    State(handlers): State<BookingHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return bad_request("Invalid session ID");
    };

    match handlers.list_handler.by_session(&session_id).await {
        Ok(reservations) => {
            let response: Vec<ReservationResponse> =
                reservations.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_booking_error(e),
    }
}

/// GET /api/reservations/client/:id - A client's reservations
pub async fn list_by_client(
    State(handlers): State<BookingHandlers>,
    Path(client_id): Path<String>,
) -> Response {
    let Ok(client_id) = client_id.parse::<ClientId>() else {
        return bad_request("Invalid client ID");
    };

    match handlers.list_handler.by_client(&client_id).await {
        Ok(reservations) => {
            let response: Vec<ReservationResponse> =
                reservations.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_booking_error(e),
    }
}

fn handle_booking_error(error: BookingError) -> Response {
    error_response(error.code(), error.to_string())
}
