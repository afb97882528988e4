//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{DriverConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Each driver configuration is valid
/// - No two drivers claim the same pulse generator
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, driver) in config.drivers.iter() {
        validate_driver(driver)?;
    }

    let drivers: heapless::Vec<&DriverConfig, 8> = config.drivers.values().collect();
    for (i, driver) in drivers.iter().enumerate() {
        let pulse = &driver.lines.pulse;
        if drivers[i + 1..].iter().any(|other| other.lines.pulse == *pulse) {
            return Err(Error::Config(ConfigError::SharedPulseLine(pulse.clone())));
        }
    }

    Ok(())
}

/// Validate a single driver configuration.
pub(crate) fn validate_driver(config: &DriverConfig) -> Result<()> {
    if config.burst_ceiling == 0 {
        return Err(Error::Config(ConfigError::InvalidCeiling(config.burst_ceiling)));
    }

    if let Some(rate) = config.step_rate {
        if !rate.is_valid() {
            return Err(Error::Config(ConfigError::InvalidStepRate(rate.value())));
        }
    }

    let period = config.effective_period();
    if period.value() == 0 {
        return Err(Error::Config(ConfigError::InvalidPeriod(period.value())));
    }

    if config.duty.value() == 0 || config.duty >= period {
        return Err(Error::Config(ConfigError::InvalidDuty {
            duty_ns: config.duty.value(),
            period_ns: period.value(),
        }));
    }

    let lines = &config.lines;
    for (label, name) in [
        ("enable", &lines.enable),
        ("direction", &lines.direction),
        ("pulse", &lines.pulse),
    ] {
        if name.is_empty() {
            return Err(Error::Config(ConfigError::EmptyLineName(label)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Hertz, Nanoseconds};

    #[test]
    fn test_default_driver_is_valid() {
        assert!(validate_driver(&DriverConfig::named("x")).is_ok());
    }

    #[test]
    fn test_zero_ceiling() {
        let config = DriverConfig {
            burst_ceiling: 0,
            ..DriverConfig::named("x")
        };
        assert!(matches!(
            validate_driver(&config),
            Err(Error::Config(ConfigError::InvalidCeiling(0)))
        ));
    }

    #[test]
    fn test_duty_must_fit_in_period() {
        let config = DriverConfig {
            period: Nanoseconds(3_000),
            ..DriverConfig::named("x")
        };
        assert!(matches!(
            validate_driver(&config),
            Err(Error::Config(ConfigError::InvalidDuty { duty_ns: 3_000, period_ns: 3_000 }))
        ));

        let config = DriverConfig {
            duty: Nanoseconds(0),
            ..DriverConfig::named("x")
        };
        assert!(matches!(
            validate_driver(&config),
            Err(Error::Config(ConfigError::InvalidDuty { .. }))
        ));
    }

    #[test]
    fn test_zero_period() {
        let config = DriverConfig {
            period: Nanoseconds(0),
            ..DriverConfig::named("x")
        };
        assert!(matches!(
            validate_driver(&config),
            Err(Error::Config(ConfigError::InvalidPeriod(0)))
        ));
    }

    #[test]
    fn test_bad_step_rate() {
        let config = DriverConfig {
            step_rate: Some(Hertz(-10.0)),
            ..DriverConfig::named("x")
        };
        assert!(matches!(
            validate_driver(&config),
            Err(Error::Config(ConfigError::InvalidStepRate(_)))
        ));
    }

    #[test]
    fn test_empty_mandatory_line() {
        let mut config = DriverConfig::named("x");
        config.lines.direction.clear();
        assert!(matches!(
            validate_driver(&config),
            Err(Error::Config(ConfigError::EmptyLineName("direction")))
        ));
    }

    #[test]
    fn test_empty_limit_lines_allowed() {
        let mut config = DriverConfig::named("x");
        config.lines.limit_a.clear();
        config.lines.limit_b.clear();
        assert!(validate_driver(&config).is_ok());
    }

    #[test]
    fn test_shared_pulse_line() {
        let mut system = SystemConfig::default();
        let a = DriverConfig::named("a");
        let b = DriverConfig::named("b");
        system
            .drivers
            .insert(heapless::String::try_from("a").unwrap(), a)
            .unwrap();
        system
            .drivers
            .insert(heapless::String::try_from("b").unwrap(), b)
            .unwrap();

        assert!(matches!(
            validate_config(&system),
            Err(Error::Config(ConfigError::SharedPulseLine(_)))
        ));
    }
}
