//! HTTP routes for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_by_reservation, record_payment, PaymentHandlers};

/// Creates the payment router with all endpoints.
pub fn routes(handlers: PaymentHandlers) -> Router {
    Router::new()
        .route("/", post(record_payment))
        .route("/reservation/:id", get(list_by_reservation))
        .with_state(handlers)
}
