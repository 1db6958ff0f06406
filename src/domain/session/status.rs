//! SessionStatus enum for the lifecycle of a published slot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a published session.
///
/// Closed sessions are withdrawn from the bookable catalog; closing is
/// only possible once no confirmed or pending reservation remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Open,
    Closed,
}

impl SessionStatus {
    /// Returns true if the session can accept new reservations.
    pub fn is_bookable(&self) -> bool {
        matches!(self, SessionStatus::Open)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Open => "open",
            SessionStatus::Closed => "closed",
        };
        write!(f, "{}", s)
    }
}
