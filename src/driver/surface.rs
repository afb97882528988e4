//! Attribute-style control surface.
//!
//! Each attribute reads as a decimal followed by a newline and accepts a
//! decimal with at most one trailing newline.

use core::fmt::{self, Write};
use core::str::FromStr;

use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
use heapless::String;

use crate::burst::BurstGenerator;
use crate::error::{ArgumentError, Error, Result};
use crate::text::bounded;

use super::StepperDriver;

/// Rendered attribute value.
pub type AttributeValue = String<24>;

/// Attributes exposed by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Attribute {
    /// Motor windings energized. Maps onto the active-low ENA line.
    Enable,
    /// Pulse generator running.
    PwmEnable,
    /// Pulse period in nanoseconds.
    Period,
    /// Read: pulses in the generator's live counters. Write: signed step
    /// request.
    PulseCount,
}

impl Attribute {
    /// Every attribute.
    pub const ALL: [Attribute; 4] = [
        Attribute::Enable,
        Attribute::PwmEnable,
        Attribute::Period,
        Attribute::PulseCount,
    ];

    /// Attribute name.
    pub const fn name(self) -> &'static str {
        match self {
            Attribute::Enable => "enable",
            Attribute::PwmEnable => "pwm_enable",
            Attribute::Period => "period",
            Attribute::PulseCount => "pulse_count",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Attribute::ALL
            .into_iter()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| ArgumentError::UnknownAttribute(bounded(s)).into())
    }
}

fn parse<T: FromStr>(input: &str) -> Result<T> {
    let digits = input.strip_suffix('\n').unwrap_or(input);
    digits
        .parse()
        .map_err(|_| ArgumentError::NotANumber.into())
}

fn render(value: u64) -> AttributeValue {
    let mut out = AttributeValue::new();
    // u64::MAX is 20 digits; always fits.
    let _ = writeln!(out, "{}", value);
    out
}

impl<EN, DIR, G, SA, SB> StepperDriver<EN, DIR, G, SA, SB>
where
    EN: OutputPin + StatefulOutputPin,
    DIR: OutputPin,
    G: BurstGenerator,
    SA: InputPin,
    SB: InputPin,
{
    /// Read an attribute.
    pub fn show(&self, attr: Attribute) -> Result<AttributeValue> {
        let value = match attr {
            Attribute::Enable => u64::from(self.is_motor_enabled()?),
            Attribute::PwmEnable => u64::from(self.controller.query_state().enabled),
            Attribute::Period => self.controller.query_state().period_ns,
            Attribute::PulseCount => self.controller.query_state().pulse_progress,
        };
        Ok(render(value))
    }

    /// Write an attribute. Returns the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the value is not a decimal of the right kind or
    /// the operation rejects it. Nothing changes on error.
    pub fn store(&self, attr: Attribute, input: &str) -> Result<usize> {
        match attr {
            Attribute::Enable => self.set_motor_enabled(parse::<i64>(input)? != 0)?,
            Attribute::PwmEnable => {
                self.controller.set_enabled(parse::<i64>(input)? != 0)?;
            }
            Attribute::Period => self.controller.set_period(parse(input)?)?,
            Attribute::PulseCount => self.controller.set_request(parse(input)?)?,
        }
        Ok(input.len())
    }

    /// Read an attribute by name.
    pub fn show_named(&self, name: &str) -> Result<AttributeValue> {
        self.show(name.parse()?)
    }

    /// Write an attribute by name.
    pub fn store_named(&self, name: &str, input: &str) -> Result<usize> {
        self.store(name.parse()?, input)
    }
}
