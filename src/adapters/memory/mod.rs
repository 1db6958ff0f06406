//! In-memory adapters for tests and single-process development.
//!
//! State lives behind `tokio::sync::RwLock`; the write lock is what
//! makes the ledger's check-and-increment indivisible here. Not
//! suitable for multi-server deployments.

mod availability_repository;
mod payment_ledger;
mod reservation_store;
mod session_store;

pub use availability_repository::InMemoryAvailabilityRepository;
pub use payment_ledger::InMemoryPaymentLedger;
pub use reservation_store::InMemoryReservationStore;
pub use session_store::InMemorySessionStore;
