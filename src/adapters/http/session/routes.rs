//! HTTP routes for session endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    close_session, get_session, list_by_trainer, materialize_session, publish_session,
    update_capacity, SessionHandlers,
};

/// Creates the session router with all endpoints.
pub fn routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", post(publish_session))
        .route("/materialize", post(materialize_session))
        .route("/:id", get(get_session))
        .route("/:id/capacity", patch(update_capacity))
        .route("/:id/close", post(close_session))
        .route("/trainer/:id", get(list_by_trainer))
        .with_state(handlers)
}
