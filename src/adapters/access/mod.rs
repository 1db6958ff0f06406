//! Access adapters - implementations of the capability-check port.
//!
//! - `StubAccessChecker` - Development/testing stub that always allows access

mod stub_access_checker;

pub use stub_access_checker::StubAccessChecker;
