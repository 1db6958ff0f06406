//! PostgreSQL adapters - sqlx-backed implementations of the ports.
//!
//! The capacity guard lives in the database: occupancy is a single
//! conditional `UPDATE ... WHERE confirmed_count < capacity`, so
//! concurrent occupiers of one session serialize on the row while
//! different sessions never contend.

mod availability_repository;
mod payment_ledger;
mod reservation_store;
mod session_store;

pub use availability_repository::PostgresAvailabilityRepository;
pub use payment_ledger::PostgresPaymentLedger;
pub use reservation_store::PostgresReservationStore;
pub use session_store::PostgresSessionStore;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wraps a database failure into the shared error shape.
pub(crate) fn db_error(action: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, err))
}
