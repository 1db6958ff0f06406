//! ReservationStatus enum and its transition table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a reservation.
///
/// Wire values keep the Spanish contract strings: `PENDIENTE`,
/// `CONFIRMADA`, `CANCELADA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    /// Held but not yet guaranteed.
    #[default]
    Pendiente,
    /// Confirmed attendance.
    Confirmada,
    /// Terminal; the capacity unit has been released.
    Cancelada,
}

impl ReservationStatus {
    /// Returns true if the reservation still holds a capacity unit.
    pub fn is_active(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelada)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Pendiente -> Confirmada
    /// - Pendiente -> Cancelada
    /// - Confirmada -> Cancelada
    ///
    /// Cancelling an already-cancelled reservation is handled as a
    /// no-op by the aggregate, not as a transition.
    pub fn can_transition_to(&self, target: &ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, target),
            (Pendiente, Confirmada) | (Pendiente, Cancelada) | (Confirmada, Cancelada)
        )
    }

    /// Checks if this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReservationStatus::Cancelada)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReservationStatus::Pendiente => "PENDIENTE",
            ReservationStatus::Confirmada => "CONFIRMADA",
            ReservationStatus::Cancelada => "CANCELADA",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReservationStatus::*;

    #[test]
    fn default_is_pendiente() {
        assert_eq!(ReservationStatus::default(), Pendiente);
    }

    #[test]
    fn pendiente_can_confirm_or_cancel() {
        assert!(Pendiente.can_transition_to(&Confirmada));
        assert!(Pendiente.can_transition_to(&Cancelada));
        assert!(!Pendiente.can_transition_to(&Pendiente));
    }

    #[test]
    fn confirmada_can_only_cancel() {
        assert!(Confirmada.can_transition_to(&Cancelada));
        assert!(!Confirmada.can_transition_to(&Confirmada));
        assert!(!Confirmada.can_transition_to(&Pendiente));
    }

    #[test]
    fn cancelada_is_terminal() {
        assert!(Cancelada.is_terminal());
        assert!(!Cancelada.can_transition_to(&Pendiente));
        assert!(!Cancelada.can_transition_to(&Confirmada));
        assert!(!Cancelada.can_transition_to(&Cancelada));
    }

    #[test]
    fn only_cancelada_is_inactive() {
        assert!(Pendiente.is_active());
        assert!(Confirmada.is_active());
        assert!(!Cancelada.is_active());
    }

    #[test]
    fn serializes_to_spanish_wire_strings() {
        assert_eq!(serde_json::to_string(&Pendiente).unwrap(), "\"PENDIENTE\"");
        assert_eq!(serde_json::to_string(&Confirmada).unwrap(), "\"CONFIRMADA\"");
        assert_eq!(serde_json::to_string(&Cancelada).unwrap(), "\"CANCELADA\"");
    }

    #[test]
    fn deserializes_from_spanish_wire_strings() {
        let status: ReservationStatus = serde_json::from_str("\"CONFIRMADA\"").unwrap();
        assert_eq!(status, Confirmada);
    }
}
