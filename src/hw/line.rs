//! Named digital lines over embedded-hal 1.0 pins.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};
use heapless::String;

use crate::error::{HardwareError, Result};
use crate::text::bounded;

/// An output line (enable, direction) with a logical name and polarity.
///
/// `set(true)` asserts the line: it drives the pin high, or low when the line
/// is active-low.
pub struct OutputLine<P> {
    name: String<16>,
    pin: P,
    active_low: bool,
}

impl<P: OutputPin> OutputLine<P> {
    /// Wrap an output pin. Lines are active-high by default.
    pub fn new(name: &str, pin: P) -> Self {
        Self {
            name: bounded(name),
            pin,
            active_low: false,
        }
    }

    /// Set the line polarity.
    pub fn active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }

    /// Logical name of the line.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Whether the line is asserted by driving it low.
    #[inline]
    pub fn is_active_low(&self) -> bool {
        self.active_low
    }

    /// Assert or deassert the line.
    pub fn set(&mut self, asserted: bool) -> Result<()> {
        self.set_level(asserted != self.active_low)
    }

    /// Drive the physical level directly.
    pub fn set_level(&mut self, high: bool) -> Result<()> {
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| HardwareError::PinError.into())
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: StatefulOutputPin> OutputLine<P> {
    /// Physical level the line is currently driven to.
    pub fn level(&mut self) -> Result<bool> {
        self.pin
            .is_set_high()
            .map_err(|_| HardwareError::PinError.into())
    }

    /// Whether the line is currently asserted.
    pub fn is_asserted(&mut self) -> Result<bool> {
        Ok(self.level()? != self.active_low)
    }
}

/// An input line (limit switch) with a logical name.
pub struct InputLine<P> {
    name: String<16>,
    pin: P,
}

impl<P: InputPin> InputLine<P> {
    /// Wrap an input pin.
    pub fn new(name: &str, pin: P) -> Self {
        Self {
            name: bounded(name),
            pin,
        }
    }

    /// Logical name of the line.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Current physical level.
    pub fn level(&mut self) -> Result<bool> {
        self.pin.is_high().map_err(|_| HardwareError::PinError.into())
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

/// Placeholder input for a limit switch that is not wired.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconnected;

impl ErrorType for Unconnected {
    type Error = Infallible;
}

impl InputPin for Unconnected {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(true)
    }
}
