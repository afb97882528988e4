//! Unit types for pulse timing.
//!
//! Keeps nanosecond periods and step frequencies apart at compile time.

use serde::Deserialize;

/// Duration in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Nanoseconds(pub u64);

impl Nanoseconds {
    /// Create a new Nanoseconds value.
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Period of one cycle at the given frequency, rounded to the nearest
    /// nanosecond. Invalid frequencies give zero.
    pub fn from_hertz(rate: Hertz) -> Self {
        if !rate.is_valid() {
            return Self(0);
        }
        Self(libm::round(1.0e9 / f64::from(rate.0)) as u64)
    }
}

/// Step frequency in pulses per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hertz(pub f32);

impl Hertz {
    /// Create a new Hertz value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Positive and finite.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}
