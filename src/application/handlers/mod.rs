//! Command and query handlers.
//!
//! - `booking` - reservation lifecycle (the engine's correctness core)
//! - `schedule` - availability templates and session publication
//! - `payment` - inert payment recording

pub mod booking;
pub mod payment;
pub mod schedule;
