//! Booking policy configuration

use serde::Deserialize;

use crate::domain::reservation::ReservationStatus;
use crate::domain::session::MAX_CAPACITY;

use super::error::ValidationError;

/// Booking policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Capacity assigned to sessions published without an explicit one
    #[serde(default = "default_session_capacity")]
    pub default_session_capacity: u32,

    /// Create reservations directly as CONFIRMADA instead of PENDIENTE
    #[serde(default)]
    pub auto_confirm: bool,
}

impl BookingConfig {
    /// The initial status reservations get when the caller does not
    /// pick one.
    pub fn default_reservation_status(&self) -> ReservationStatus {
        if self.auto_confirm {
            ReservationStatus::Confirmada
        } else {
            ReservationStatus::Pendiente
        }
    }

    /// Validate booking configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_session_capacity < 1 || self.default_session_capacity > MAX_CAPACITY {
            return Err(ValidationError::InvalidDefaultCapacity);
        }
        Ok(())
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_session_capacity: default_session_capacity(),
            auto_confirm: false,
        }
    }
}

fn default_session_capacity() -> u32 {
    10
}
