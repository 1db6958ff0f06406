//! Session endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::SessionHandlers;
pub use routes::routes;
