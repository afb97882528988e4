//! Stepper driver facade.
//!
//! A [`StepperDriver`] owns everything one ENA/DIR/PUL driver board needs:
//! the enable line, the [`BurstController`] with its direction line and pulse
//! generator, and the [`LimitSwitchMonitor`]. Build one with
//! [`StepperDriverBuilder`] from pins you already hold, or with
//! [`StepperDriver::probe`] from a [`HardwareProvider`](crate::hw::HardwareProvider).

mod builder;
mod probe;
mod surface;

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
use heapless::String;
use log::info;

use crate::burst::{BurstController, BurstGenerator};
use crate::completion::CompletionBus;
use crate::config::DriverModel;
use crate::error::Result;
use crate::hw::{IrqNumber, OutputLine, Unconnected};
use crate::limit::{IrqReturn, LimitSwitchMonitor};

pub use builder::StepperDriverBuilder;
pub use probe::ProbedDriver;
pub use surface::{Attribute, AttributeValue};

/// One stepper driver board.
///
/// Type parameters are the enable pin, direction pin, pulse generator and the
/// two limit-switch inputs.
pub struct StepperDriver<EN, DIR, G, SA = Unconnected, SB = Unconnected> {
    name: String<32>,
    model: DriverModel,
    enable_line: Mutex<CriticalSectionRawMutex, RefCell<OutputLine<EN>>>,
    controller: BurstController<G, DIR>,
    limit_switches: LimitSwitchMonitor<SA, SB>,
}

impl<EN, DIR, G, SA, SB> StepperDriver<EN, DIR, G, SA, SB>
where
    EN: OutputPin + StatefulOutputPin,
    DIR: OutputPin,
    G: BurstGenerator,
    SA: InputPin,
    SB: InputPin,
{
    pub(crate) fn from_parts(
        name: String<32>,
        model: DriverModel,
        enable_line: OutputLine<EN>,
        controller: BurstController<G, DIR>,
        limit_switches: LimitSwitchMonitor<SA, SB>,
    ) -> Self {
        Self {
            name,
            model,
            enable_line: Mutex::new(RefCell::new(enable_line)),
            controller,
            limit_switches,
        }
    }

    /// Driver name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Driver board model.
    #[inline]
    pub fn model(&self) -> DriverModel {
        self.model
    }

    /// Burst controller.
    #[inline]
    pub fn controller(&self) -> &BurstController<G, DIR> {
        &self.controller
    }

    /// Limit-switch monitor.
    #[inline]
    pub fn limit_switches(&self) -> &LimitSwitchMonitor<SA, SB> {
        &self.limit_switches
    }

    /// Whether the motor windings are energized. ENA is active-low.
    pub fn is_motor_enabled(&self) -> Result<bool> {
        self.enable_line
            .lock(|cell| cell.borrow_mut().is_asserted())
    }

    /// Energize (`true`) or release (`false`) the motor windings.
    pub fn set_motor_enabled(&self, enabled: bool) -> Result<()> {
        self.enable_line.lock(|cell| cell.borrow_mut().set(enabled))?;
        info!("{}: motor {}", self.name, if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    /// Interrupt entry point for the limit-switch lines.
    #[inline]
    pub fn handle_irq(&self, irq: IrqNumber) -> IrqReturn {
        self.limit_switches.handle_irq(irq)
    }
}

impl<EN, DIR, G> StepperDriver<EN, DIR, G>
where
    EN: OutputPin + StatefulOutputPin,
    DIR: OutputPin,
    G: BurstGenerator,
{
    /// Create a builder.
    pub fn builder() -> StepperDriverBuilder<EN, DIR, G> {
        StepperDriverBuilder::new()
    }
}

impl<EN, DIR, G, SA, SB> StepperDriver<EN, DIR, G, SA, SB>
where
    EN: OutputPin + StatefulOutputPin,
    DIR: OutputPin + Send,
    G: BurstGenerator + Send,
    SA: InputPin,
    SB: InputPin,
{
    /// Subscribe this driver's controller to the completion bus.
    ///
    /// # Errors
    ///
    /// `ResourceUnavailable` if the generator already has a listener or the
    /// bus is full.
    pub fn attach<'a, const N: usize>(&'a self, bus: &CompletionBus<'a, N>) -> Result<()> {
        bus.subscribe(&self.controller)?;
        info!("{}: listening for {} completions", self.name, self.controller.generator_id());
        Ok(())
    }

    /// Detach from the bus and stop the generator.
    pub fn shutdown<const N: usize>(&self, bus: &CompletionBus<'_, N>) {
        bus.unsubscribe(self.controller.generator_id());
        self.controller.shutdown();
        info!("{}: shut down", self.name);
    }
}
