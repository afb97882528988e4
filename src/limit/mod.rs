//! Limit-switch edge monitoring.
//!
//! Two inputs, each with a rising + falling edge interrupt. Edges are
//! reported as [`LimitSwitchEvent`]s and never touch burst state.

mod monitor;

use core::fmt;

pub use monitor::{Coverage, LimitSwitchMonitor, DEFAULT_EVENT_CAPACITY};

/// Which limit switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchId {
    /// First switch (`sw1`).
    A,
    /// Second switch (`sw2`).
    B,
}

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchId::A => f.write_str("SW1"),
            SwitchId::B => f.write_str("SW2"),
        }
    }
}

/// One observed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LimitSwitchEvent {
    /// Switch that fired.
    pub switch: SwitchId,
    /// Line level read when handling the edge.
    pub level: bool,
}

/// Interrupt handler verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqReturn {
    /// The interrupt belonged to a watched switch.
    Handled,
    /// Not one of ours.
    None,
}
