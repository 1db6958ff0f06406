//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! The booking engine itself depends on three operations only: the
//! ledger's `try_occupy`/`release` pair and a consistent read of a
//! client's active reservations. Everything else is schedule-management
//! and read-path plumbing.

mod access_checker;
mod availability_repository;
mod capacity_ledger;
mod payment_ledger;
mod reservation_repository;
mod session_repository;

pub use access_checker::{AccessChecker, AccessResult};
pub use availability_repository::AvailabilityRepository;
pub use capacity_ledger::{CapacityLedger, OccupancyToken};
pub use payment_ledger::PaymentLedger;
pub use reservation_repository::{ClientBooking, ReservationRepository};
pub use session_repository::SessionRepository;
