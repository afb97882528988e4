//! Burst lifecycle state.

use core::fmt;

/// Rotation direction requested by the sign of a step command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Positive counts.
    #[default]
    Forward,
    /// Negative counts.
    Reverse,
}

impl Direction {
    /// Direction for a signed, non-zero step count.
    #[inline]
    pub fn of(count: i64) -> Self {
        if count < 0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    /// Whether the direction line is asserted for this direction.
    #[inline]
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }
}

/// Where the pulse generator is in its lifecycle.
///
/// `Idle -> Armed -> Running -> Idle`. Completion or a disable request
/// returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BurstPhase {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Generator programmed, start pending.
    Armed,
    /// Generator emitting pulses.
    Running,
}

impl BurstPhase {
    /// Armed or running.
    #[inline]
    pub fn is_active(self) -> bool {
        self != BurstPhase::Idle
    }

    /// Get the phase name as a static string.
    pub fn name(self) -> &'static str {
        match self {
            BurstPhase::Idle => "Idle",
            BurstPhase::Armed => "Armed",
            BurstPhase::Running => "Running",
        }
    }
}

impl fmt::Display for BurstPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Command-side motor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorState {
    /// Pulses requested by the last command, cleared once the burst is armed.
    pub pending_count: i64,
    /// Direction of the last command.
    pub direction: Direction,
    /// Generator lifecycle phase.
    pub phase: BurstPhase,
}

impl MotorState {
    /// Whether a burst is armed or running.
    #[inline]
    pub fn armed(&self) -> bool {
        self.phase.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(Direction::of(-5), Direction::Reverse);
        assert_eq!(Direction::of(5), Direction::Forward);
        assert!(Direction::Forward.is_forward());
        assert!(!Direction::Reverse.is_forward());
    }

    #[test]
    fn test_initial_state() {
        let state = MotorState::default();
        assert_eq!(state.pending_count, 0);
        assert_eq!(state.direction, Direction::Forward);
        assert!(!state.armed());
        assert_eq!(state.phase.name(), "Idle");
    }
}
