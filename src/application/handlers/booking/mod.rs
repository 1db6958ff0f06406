//! Booking handlers - the reservation state machine.

mod cancel_reservation;
mod client_locks;
mod confirm_reservation;
mod create_reservation;
mod list_reservations;
mod update_reservation_status;

pub use cancel_reservation::{CancelReservationCommand, CancelReservationHandler};
pub use client_locks::ClientLocks;
pub use confirm_reservation::{ConfirmReservationCommand, ConfirmReservationHandler};
pub use create_reservation::{CreateReservationCommand, CreateReservationHandler};
pub use list_reservations::ListReservationsHandler;
pub use update_reservation_status::{
    UpdateReservationStatusCommand, UpdateReservationStatusHandler,
};
