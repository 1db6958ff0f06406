//! HTTP adapters - REST API over the application handlers.
//!
//! Each domain area has its own DTOs, handlers and routes. Error codes
//! map to transport statuses in exactly one place (`error`).

pub mod availability;
pub mod booking;
pub mod error;
pub mod payment;
pub mod session;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use availability::AvailabilityHandlers;
pub use booking::BookingHandlers;
pub use payment::PaymentHandlers;
pub use session::SessionHandlers;

/// Builds the full API router.
pub fn api_router(
    availability: AvailabilityHandlers,
    sessions: SessionHandlers,
    booking: BookingHandlers,
    payments: PaymentHandlers,
) -> Router {
    Router::new()
        .nest("/api/availability", availability::routes(availability))
        .nest("/api/sessions", session::routes(sessions))
        .nest("/api/reservations", booking::routes(booking))
        .nest("/api/payments", payment::routes(payments))
        .layer(TraceLayer::new_for_http())
}
