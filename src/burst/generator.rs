//! Pulse generator handle.

use core::fmt;

use super::encoder::BurstConfig;

/// Identity of a pulse generator, unique within one completion bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GeneratorId(pub u32);

impl fmt::Display for GeneratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pwm{}", self.0)
    }
}

/// A one-shot pulse generator with automatic repeat cycles.
///
/// Starting it schedules hardware work and returns immediately. Completion is
/// reported out of band through a [`CompletionBus`](crate::completion::CompletionBus).
pub trait BurstGenerator {
    /// Error reported by the generator.
    type Error: fmt::Debug;

    /// Stable identity used to match completion broadcasts.
    fn id(&self) -> GeneratorId;

    /// Initial pulse shape.
    fn configure(&mut self, duty_ns: u64, period_ns: u64) -> Result<(), Self::Error>;

    /// Current pulse period in nanoseconds.
    fn period_ns(&self) -> u64;

    /// Change the pulse period. A running burst picks it up on its next tick.
    fn set_period_ns(&mut self, period_ns: u64);

    /// Load pulse counts for the next run.
    fn load(&mut self, burst: &BurstConfig);

    /// Live primary/repeat/tail counters.
    fn counters(&self) -> BurstConfig;

    /// Start a run.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Stop the generator.
    fn disable(&mut self);

    /// Whether the generator is running.
    fn is_enabled(&self) -> bool;
}
