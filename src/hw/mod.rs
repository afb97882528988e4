//! Hardware collaborators.
//!
//! The core never looks at device trees or board files. Everything it needs
//! is handed out by a [`HardwareProvider`]: output lines, input lines, the
//! pulse generator, and edge interrupts. A resource that is not configured
//! comes back as `None`.

mod line;

use core::fmt;

use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};

use crate::burst::BurstGenerator;

pub use line::{InputLine, OutputLine, Unconnected};

/// Interrupt number assigned to an edge-triggered input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqNumber(pub u32);

impl fmt::Display for IrqNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "irq{}", self.0)
    }
}

/// Acquires lines, generators and interrupts by logical name.
pub trait HardwareProvider {
    /// Output pin type (enable, direction).
    type Output: OutputPin + StatefulOutputPin;
    /// Input pin type (limit switches).
    type Input: InputPin;
    /// Pulse generator type.
    type Generator: BurstGenerator;

    /// Acquire an output line, driven to `initial_high` on success.
    fn output_line(&mut self, name: &str, initial_high: bool) -> Option<Self::Output>;

    /// Acquire an input line.
    fn input_line(&mut self, name: &str) -> Option<Self::Input>;

    /// Acquire the pulse generator wired to the named line.
    fn generator(&mut self, name: &str) -> Option<Self::Generator>;

    /// Request a rising + falling edge interrupt on an acquired input line.
    fn request_edge_irq(&mut self, name: &str) -> Option<IrqNumber>;
}
