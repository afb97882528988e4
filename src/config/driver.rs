//! Driver configuration from TOML.

use core::fmt;
use core::str::FromStr;

use heapless::String;
use serde::Deserialize;

use crate::burst::DEFAULT_CEILING;
use crate::error::ConfigError;
use crate::text::bounded;

use super::policy::RequestPolicy;
use super::units::{Hertz, Nanoseconds};

/// Default pulse period (about 16.7 kHz).
pub const DEFAULT_PERIOD: Nanoseconds = Nanoseconds(60_000);

/// Default pulse high time.
pub const DEFAULT_DUTY: Nanoseconds = Nanoseconds(3_000);

/// Supported driver boards. Both share the ENA/DIR/PUL interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverModel {
    /// Leadshine DM542 and clones.
    #[default]
    Dm542,
    /// TB6600 boards.
    Tb6600,
}

impl DriverModel {
    /// Compatible string as written in configuration.
    pub const fn compatible(self) -> &'static str {
        match self {
            DriverModel::Dm542 => "dm542",
            DriverModel::Tb6600 => "tb6600",
        }
    }
}

impl fmt::Display for DriverModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.compatible())
    }
}

impl FromStr for DriverModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dm542" => Ok(DriverModel::Dm542),
            "tb6600" => Ok(DriverModel::Tb6600),
            other => Err(ConfigError::UnknownCompatible(bounded(other))),
        }
    }
}

impl<'de> Deserialize<'de> for DriverModel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = String::<32>::deserialize(deserializer)?;
        value.parse().map_err(|e: ConfigError| {
            let mut buf = String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}

/// Logical line names. Empty limit-switch names leave that switch unwired.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineNames {
    /// Enable output.
    #[serde(default = "default_enable")]
    pub enable: String<16>,
    /// Direction output.
    #[serde(default = "default_direction")]
    pub direction: String<16>,
    /// Pulse generator.
    #[serde(default = "default_pulse")]
    pub pulse: String<16>,
    /// Limit switch A input.
    #[serde(default = "default_limit_a")]
    pub limit_a: String<16>,
    /// Limit switch B input.
    #[serde(default = "default_limit_b")]
    pub limit_b: String<16>,
}

fn line_name(name: &str) -> String<16> {
    bounded(name)
}

fn default_enable() -> String<16> {
    line_name("ena")
}

fn default_direction() -> String<16> {
    line_name("dir")
}

fn default_pulse() -> String<16> {
    line_name("pul")
}

fn default_limit_a() -> String<16> {
    line_name("sw1")
}

fn default_limit_b() -> String<16> {
    line_name("sw2")
}

impl Default for LineNames {
    fn default() -> Self {
        Self {
            enable: default_enable(),
            direction: default_direction(),
            pulse: default_pulse(),
            limit_a: default_limit_a(),
            limit_b: default_limit_b(),
        }
    }
}

/// Complete driver configuration from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DriverConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Driver board.
    #[serde(default)]
    pub compatible: DriverModel,

    /// Pulse period.
    #[serde(default = "default_period", rename = "period_ns")]
    pub period: Nanoseconds,

    /// Step rate; overrides `period_ns` when set.
    #[serde(default, rename = "step_rate_hz")]
    pub step_rate: Option<Hertz>,

    /// Pulse high time.
    #[serde(default = "default_duty", rename = "duty_ns")]
    pub duty: Nanoseconds,

    /// Pulses per primary burst the generator supports.
    #[serde(default = "default_ceiling")]
    pub burst_ceiling: u32,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Handling of pulse requests while a burst is in flight.
    #[serde(default)]
    pub request_policy: RequestPolicy,

    /// Line names.
    #[serde(default)]
    pub lines: LineNames,
}

fn default_period() -> Nanoseconds {
    DEFAULT_PERIOD
}

fn default_duty() -> Nanoseconds {
    DEFAULT_DUTY
}

fn default_ceiling() -> u32 {
    DEFAULT_CEILING
}

impl DriverConfig {
    /// Configuration with defaults and the given name.
    pub fn named(name: &str) -> Self {
        Self {
            name: bounded(name),
            ..Self::default()
        }
    }

    /// Pulse period to program at startup.
    pub fn effective_period(&self) -> Nanoseconds {
        match self.step_rate {
            Some(rate) => Nanoseconds::from_hertz(rate),
            None => self.period,
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            name: bounded("stepper"),
            compatible: DriverModel::default(),
            period: DEFAULT_PERIOD,
            step_rate: None,
            duty: DEFAULT_DUTY,
            burst_ceiling: DEFAULT_CEILING,
            invert_direction: false,
            request_policy: RequestPolicy::default(),
            lines: LineNames::default(),
        }
    }
}
