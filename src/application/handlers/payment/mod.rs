//! Payment handlers - inert ledger rows attached to reservations.

mod record_payment;

pub use record_payment::{RecordPaymentCommand, RecordPaymentHandler};
