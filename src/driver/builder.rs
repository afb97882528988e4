//! Builder pattern for StepperDriver.

use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
use log::info;

use crate::burst::{BurstController, BurstGenerator, PulseBurstEncoder};
use crate::config::units::Nanoseconds;
use crate::config::{validate_driver, DriverConfig, DriverModel, RequestPolicy, SystemConfig};
use crate::error::{ConfigError, Error, HardwareError, ResourceError, Result};
use crate::hw::{InputLine, IrqNumber, OutputLine, Unconnected};
use crate::limit::LimitSwitchMonitor;
use crate::text::bounded;

use super::StepperDriver;

/// Builder for creating StepperDriver instances.
///
/// Limit switches are optional; each one changes the builder's input type.
pub struct StepperDriverBuilder<EN, DIR, G, SA = Unconnected, SB = Unconnected> {
    config: DriverConfig,
    enable_pin: Option<EN>,
    direction_pin: Option<DIR>,
    generator: Option<G>,
    limit_a: Option<(SA, IrqNumber)>,
    limit_b: Option<(SB, IrqNumber)>,
}

impl<EN, DIR, G> Default for StepperDriverBuilder<EN, DIR, G>
where
    EN: OutputPin + StatefulOutputPin,
    DIR: OutputPin,
    G: BurstGenerator,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<EN, DIR, G> StepperDriverBuilder<EN, DIR, G>
where
    EN: OutputPin + StatefulOutputPin,
    DIR: OutputPin,
    G: BurstGenerator,
{
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: DriverConfig::default(),
            enable_pin: None,
            direction_pin: None,
            generator: None,
            limit_a: None,
            limit_b: None,
        }
    }
}

impl<EN, DIR, G, SA, SB> StepperDriverBuilder<EN, DIR, G, SA, SB>
where
    EN: OutputPin + StatefulOutputPin,
    DIR: OutputPin,
    G: BurstGenerator,
    SA: InputPin,
    SB: InputPin,
{
    /// Set the ENA pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn direction_pin(mut self, pin: DIR) -> Self {
        self.direction_pin = Some(pin);
        self
    }

    /// Set the pulse generator driving PUL.
    pub fn generator(mut self, generator: G) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Watch limit switch A on `pin`, whose both-edge interrupt is `irq`.
    pub fn limit_switch_a<A: InputPin>(
        self,
        pin: A,
        irq: IrqNumber,
    ) -> StepperDriverBuilder<EN, DIR, G, A, SB> {
        StepperDriverBuilder {
            config: self.config,
            enable_pin: self.enable_pin,
            direction_pin: self.direction_pin,
            generator: self.generator,
            limit_a: Some((pin, irq)),
            limit_b: self.limit_b,
        }
    }

    /// Watch limit switch B on `pin`, whose both-edge interrupt is `irq`.
    pub fn limit_switch_b<B: InputPin>(
        self,
        pin: B,
        irq: IrqNumber,
    ) -> StepperDriverBuilder<EN, DIR, G, SA, B> {
        StepperDriverBuilder {
            config: self.config,
            enable_pin: self.enable_pin,
            direction_pin: self.direction_pin,
            generator: self.generator,
            limit_a: self.limit_a,
            limit_b: Some((pin, irq)),
        }
    }

    /// Declare the limit-switch input types without wiring any switch yet.
    ///
    /// Discards switches set so far. Used when the switches are attached to
    /// the monitor after build.
    pub(crate) fn limit_inputs<A: InputPin, B: InputPin>(
        self,
    ) -> StepperDriverBuilder<EN, DIR, G, A, B> {
        StepperDriverBuilder {
            config: self.config,
            enable_pin: self.enable_pin,
            direction_pin: self.direction_pin,
            generator: self.generator,
            limit_a: None,
            limit_b: None,
        }
    }

    /// Set the driver name.
    pub fn name(mut self, name: &str) -> Self {
        self.config.name = bounded(name);
        self
    }

    /// Set the driver board model.
    pub fn model(mut self, model: DriverModel) -> Self {
        self.config.compatible = model;
        self
    }

    /// Set the initial pulse period.
    pub fn period(mut self, period: Nanoseconds) -> Self {
        self.config.period = period;
        self.config.step_rate = None;
        self
    }

    /// Set the pulse high time.
    pub fn duty(mut self, duty: Nanoseconds) -> Self {
        self.config.duty = duty;
        self
    }

    /// Set the pulses per primary burst.
    pub fn burst_ceiling(mut self, ceiling: u32) -> Self {
        self.config.burst_ceiling = ceiling;
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.config.invert_direction = invert;
        self
    }

    /// Set how requests arriving mid-burst are handled.
    pub fn request_policy(mut self, policy: RequestPolicy) -> Self {
        self.config.request_policy = policy;
        self
    }

    /// Configure from a DriverConfig.
    pub fn from_config(mut self, config: &DriverConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Configure from SystemConfig by driver key.
    pub fn from_system_config(self, config: &SystemConfig, key: &str) -> Result<Self> {
        let driver_config = config.driver(key).ok_or_else(|| {
            Error::Config(ConfigError::DriverNotFound(bounded(key)))
        })?;

        Ok(self.from_config(driver_config))
    }

    /// Build the StepperDriver.
    ///
    /// Programs the generator's pulse shape, releases the motor (ENA high)
    /// and starts watching any limit switches given.
    ///
    /// # Errors
    ///
    /// `Config` if the configuration is invalid, `ResourceUnavailable` if a
    /// pin or the generator is missing, `Hardware` if programming them fails.
    pub fn build(self) -> Result<StepperDriver<EN, DIR, G, SA, SB>> {
        let config = self.config;
        validate_driver(&config)?;
        let lines = &config.lines;

        let enable_pin = self
            .enable_pin
            .ok_or_else(|| ResourceError::LineUnavailable(lines.enable.clone()))?;
        let direction_pin = self
            .direction_pin
            .ok_or_else(|| ResourceError::LineUnavailable(lines.direction.clone()))?;
        let mut generator = self
            .generator
            .ok_or_else(|| ResourceError::GeneratorUnavailable(lines.pulse.clone()))?;

        let encoder = PulseBurstEncoder::new(config.burst_ceiling)?;
        let period = config.effective_period();
        generator
            .configure(config.duty.value(), period.value())
            .map_err(|_| HardwareError::GeneratorError)?;

        // ENA is active-low: deasserting drives it high and leaves the motor free.
        let mut enable_line = OutputLine::new(lines.enable.as_str(), enable_pin).active_low(true);
        enable_line.set(false)?;

        let direction_line = OutputLine::new(lines.direction.as_str(), direction_pin)
            .active_low(config.invert_direction);

        let controller = BurstController::new(generator, direction_line, encoder)
            .with_duty(config.duty.value())
            .with_policy(config.request_policy);

        let limit_switches = LimitSwitchMonitor::new();
        if let Some((pin, irq)) = self.limit_a {
            limit_switches.watch_a(InputLine::new(lines.limit_a.as_str(), pin), irq);
        }
        if let Some((pin, irq)) = self.limit_b {
            limit_switches.watch_b(InputLine::new(lines.limit_b.as_str(), pin), irq);
        }

        info!(
            "{}: {} ready on {}, period {} ns, duty {} ns",
            config.name,
            config.compatible,
            controller.generator_id(),
            period.value(),
            config.duty.value()
        );

        Ok(StepperDriver::from_parts(
            config.name.clone(),
            config.compatible,
            enable_line,
            controller,
            limit_switches,
        ))
    }
}
