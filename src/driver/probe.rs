//! Driver startup from a hardware provider.

use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
use log::{info, warn};

use crate::burst::BurstGenerator;
use crate::config::{validate_driver, DriverConfig};
use crate::error::{Error, ResourceError, Result, SubscriptionError};
use crate::hw::{HardwareProvider, InputLine, IrqNumber};
use crate::limit::SwitchId;

use super::{StepperDriver, StepperDriverBuilder};

/// Driver type produced by [`StepperDriver::probe`] for a provider.
pub type ProbedDriver<P> = StepperDriver<
    <P as HardwareProvider>::Output,
    <P as HardwareProvider>::Output,
    <P as HardwareProvider>::Generator,
    <P as HardwareProvider>::Input,
    <P as HardwareProvider>::Input,
>;

impl<O, I, G> StepperDriver<O, O, G, I, I>
where
    O: OutputPin + StatefulOutputPin,
    I: InputPin,
    G: BurstGenerator,
{
    /// Acquire every resource named in `config` and assemble a driver.
    ///
    /// Order: enable line (driven low), direction line (driven low), pulse
    /// generator, then the limit switches. A missing limit switch or a failed
    /// interrupt request only logs a warning and reduces
    /// [`coverage`](crate::limit::LimitSwitchMonitor::coverage).
    ///
    /// The driver is not yet listening for completions; call
    /// [`attach`](Self::attach) once it has a stable address.
    ///
    /// # Errors
    ///
    /// `Config` for an invalid configuration, `ResourceUnavailable` if the
    /// enable line, direction line or generator cannot be acquired,
    /// `Hardware` if programming them fails.
    pub fn probe<P>(config: &DriverConfig, hw: &mut P) -> Result<Self>
    where
        P: HardwareProvider<Output = O, Input = I, Generator = G>,
    {
        validate_driver(config)?;
        let lines = &config.lines;

        let enable = hw
            .output_line(&lines.enable, false)
            .ok_or_else(|| ResourceError::LineUnavailable(lines.enable.clone()))?;
        let direction = hw
            .output_line(&lines.direction, false)
            .ok_or_else(|| ResourceError::LineUnavailable(lines.direction.clone()))?;
        let generator = hw
            .generator(&lines.pulse)
            .ok_or_else(|| ResourceError::GeneratorUnavailable(lines.pulse.clone()))?;

        let driver = StepperDriverBuilder::new()
            .from_config(config)
            .enable_pin(enable)
            .direction_pin(direction)
            .generator(generator)
            .limit_inputs::<I, I>()
            .build()?;

        match subscribe_switch(hw, SwitchId::A, &lines.limit_a) {
            Ok((pin, irq)) => driver
                .limit_switches
                .watch_a(InputLine::new(&lines.limit_a, pin), irq),
            Err(e) => warn!("{}: {}", config.name, Error::Subscription(e)),
        }
        match subscribe_switch(hw, SwitchId::B, &lines.limit_b) {
            Ok((pin, irq)) => driver
                .limit_switches
                .watch_b(InputLine::new(&lines.limit_b, pin), irq),
            Err(e) => warn!("{}: {}", config.name, Error::Subscription(e)),
        }

        let coverage = driver.limit_switches.coverage();
        if !coverage.is_full() {
            warn!(
                "{}: limit switch coverage reduced (A: {}, B: {})",
                config.name, coverage.a, coverage.b
            );
        }
        info!("{}: probed", config.name);
        Ok(driver)
    }
}

fn subscribe_switch<P: HardwareProvider>(
    hw: &mut P,
    switch: SwitchId,
    name: &str,
) -> core::result::Result<(P::Input, IrqNumber), SubscriptionError> {
    if name.is_empty() {
        return Err(SubscriptionError::LineMissing(switch));
    }
    let pin = hw
        .input_line(name)
        .ok_or(SubscriptionError::LineMissing(switch))?;
    let irq = hw
        .request_edge_irq(name)
        .ok_or(SubscriptionError::IrqRequestFailed(switch))?;
    Ok((pin, irq))
}
