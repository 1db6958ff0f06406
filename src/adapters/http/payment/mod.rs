//! Payment endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::PaymentHandlers;
pub use routes::routes;
