//! Adapters - Implementations of the ports against concrete
//! infrastructure.
//!
//! - `postgres` - sqlx-backed repositories and capacity ledger
//! - `memory` - in-process implementations for tests and development
//! - `access` - capability-check adapters
//! - `http` - axum REST facade over the application handlers

pub mod access;
pub mod http;
pub mod memory;
pub mod postgres;
