//! Payment records attached to reservations.
//!
//! Payments are inert ledger rows; gateway integration lives outside
//! this crate. The engine only checks that the target reservation
//! exists and is still payable.

mod errors;
mod record;

pub use errors::PaymentError;
pub use record::{Payment, PaymentStatus};
