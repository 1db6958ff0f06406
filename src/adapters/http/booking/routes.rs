//! HTTP routes for reservation endpoints.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    cancel_reservation, create_reservation, list_by_client, list_by_session,
    update_reservation_status, BookingHandlers,
};

/// Creates the reservation router with all endpoints.
pub fn routes(handlers: BookingHandlers) -> Router {
    Router::new()
        .route("/", post(create_reservation))
        .route("/:id/status", patch(update_reservation_status))
        .route("/:id", delete(cancel_reservation))
        .route("/session/:id", get(list_by_session))
        .route("/client/:id", get(list_by_client))
        .with_state(handlers)
}
