//! HTTP routes for availability template endpoints.

use axum::{
    routing::{patch, post},
    Router,
};

use super::handlers::{create_template, delete_template, update_template, AvailabilityHandlers};

/// Creates the availability router with all endpoints.
pub fn routes(handlers: AvailabilityHandlers) -> Router {
    Router::new()
        .route("/", post(create_template))
        .route("/:id", patch(update_template).delete(delete_template))
        .with_state(handlers)
}
