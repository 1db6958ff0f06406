//! Trainbook - Fitness-Training Marketplace Backend
//!
//! Trainers publish recurring weekly availability, clients book
//! concrete time slots, and payments attach to reservations. The core
//! is the availability and booking engine: materializing templates
//! into capacity-bounded sessions and admitting reservations without
//! overbooking or double-booking.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
