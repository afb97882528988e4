//! Error types for stepper-burst.
//!
//! Splits failures the way the driver treats them: malformed caller input is
//! rejected per write, missing hardware is fatal at probe, and limit-switch
//! subscription problems only degrade coverage.

use core::fmt;

use crate::limit::SwitchId;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-burst operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Malformed or out-of-range caller input; the write had no effect
    InvalidArgument(ArgumentError),
    /// A required line, generator or bus slot could not be acquired
    ResourceUnavailable(ResourceError),
    /// A limit-switch interrupt could not be registered
    Subscription(SubscriptionError),
    /// A pin or generator operation failed
    Hardware(HardwareError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Driver name not found in configuration
    DriverNotFound(heapless::String<32>),
    /// Unsupported `compatible` string
    UnknownCompatible(heapless::String<32>),
    /// Burst ceiling must be > 0
    InvalidCeiling(u32),
    /// Pulse period must be > 0
    InvalidPeriod(u64),
    /// Duty must be > 0 and shorter than the period
    InvalidDuty {
        /// High time in nanoseconds
        duty_ns: u64,
        /// Period in nanoseconds
        period_ns: u64,
    },
    /// Step rate must be a positive, finite frequency
    InvalidStepRate(f32),
    /// A mandatory line name is empty
    EmptyLineName(&'static str),
    /// Two drivers claim the same pulse generator
    SharedPulseLine(heapless::String<16>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Rejected caller input.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentError {
    /// Input is not a base-10 integer
    NotANumber,
    /// Pulse count must be non-zero
    ZeroPulseCount,
    /// Burst ceiling must be non-zero
    ZeroCeiling,
    /// Requested pulse count needs more repeat cycles than the hardware holds
    PulseCountOverflow(u64),
    /// Period must be > 0
    ZeroPeriod,
    /// Period must be longer than the pulse high time
    PeriodBelowDuty {
        /// Requested period in nanoseconds
        period_ns: u64,
        /// Configured duty in nanoseconds
        duty_ns: u64,
    },
    /// No attribute with that name
    UnknownAttribute(heapless::String<32>),
    /// A new request arrived while a burst is in flight and the policy rejects it
    BurstInFlight,
}

/// Acquisition failures during probe or subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// A named line could not be acquired
    LineUnavailable(heapless::String<16>),
    /// The named pulse generator could not be acquired
    GeneratorUnavailable(heapless::String<16>),
    /// The completion bus has no free listener slot
    BusFull,
    /// Another listener already owns this generator
    GeneratorAlreadySubscribed(u32),
}

/// Limit-switch subscription failures.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionError {
    /// The input line for this switch is not configured
    LineMissing(SwitchId),
    /// The edge interrupt for this switch could not be requested
    IrqRequestFailed(SwitchId),
}

/// Hardware operation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum HardwareError {
    /// GPIO pin operation failed
    PinError,
    /// Pulse generator rejected an operation
    GeneratorError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::InvalidArgument(e) => write!(f, "Invalid argument: {}", e),
            Error::ResourceUnavailable(e) => write!(f, "Resource unavailable: {}", e),
            Error::Subscription(e) => write!(f, "Subscription failure: {}", e),
            Error::Hardware(e) => write!(f, "Hardware error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::DriverNotFound(name) => write!(f, "Driver '{}' not found", name),
            ConfigError::UnknownCompatible(name) => {
                write!(f, "Unknown compatible '{}'. Valid values: dm542, tb6600", name)
            }
            ConfigError::InvalidCeiling(v) => write!(f, "Invalid burst ceiling: {}. Must be > 0", v),
            ConfigError::InvalidPeriod(v) => write!(f, "Invalid period: {} ns. Must be > 0", v),
            ConfigError::InvalidDuty { duty_ns, period_ns } => {
                write!(f, "Invalid duty: {} ns. Must be > 0 and < period ({} ns)", duty_ns, period_ns)
            }
            ConfigError::InvalidStepRate(v) => write!(f, "Invalid step rate: {} Hz. Must be > 0", v),
            ConfigError::EmptyLineName(which) => write!(f, "Line name for '{}' is empty", which),
            ConfigError::SharedPulseLine(name) => {
                write!(f, "Pulse line '{}' is used by more than one driver", name)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::NotANumber => write!(f, "value is not a base-10 integer"),
            ArgumentError::ZeroPulseCount => write!(f, "pulse count must be non-zero"),
            ArgumentError::ZeroCeiling => write!(f, "burst ceiling must be non-zero"),
            ArgumentError::PulseCountOverflow(v) => {
                write!(f, "pulse count {} exceeds the repeat register range", v)
            }
            ArgumentError::ZeroPeriod => write!(f, "period must be non-zero"),
            ArgumentError::PeriodBelowDuty { period_ns, duty_ns } => {
                write!(f, "period {} ns must exceed duty {} ns", period_ns, duty_ns)
            }
            ArgumentError::UnknownAttribute(name) => write!(f, "unknown attribute '{}'", name),
            ArgumentError::BurstInFlight => write!(f, "a burst is in flight"),
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::LineUnavailable(name) => write!(f, "failed to get '{}' line", name),
            ResourceError::GeneratorUnavailable(name) => {
                write!(f, "failed to get pulse generator '{}'", name)
            }
            ResourceError::BusFull => write!(f, "completion bus is full"),
            ResourceError::GeneratorAlreadySubscribed(id) => {
                write!(f, "generator {} already has a completion listener", id)
            }
        }
    }
}

impl fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionError::LineMissing(switch) => {
                write!(f, "limit switch {} line not configured", switch)
            }
            SubscriptionError::IrqRequestFailed(switch) => {
                write!(f, "failed to request limit switch {} interrupt", switch)
            }
        }
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareError::PinError => write!(f, "GPIO pin operation failed"),
            HardwareError::GeneratorError => write!(f, "pulse generator operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<ArgumentError> for Error {
    fn from(e: ArgumentError) -> Self {
        Error::InvalidArgument(e)
    }
}

impl From<ResourceError> for Error {
    fn from(e: ResourceError) -> Self {
        Error::ResourceUnavailable(e)
    }
}

impl From<SubscriptionError> for Error {
    fn from(e: SubscriptionError) -> Self {
        Error::Subscription(e)
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Error::Hardware(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for ArgumentError {}

#[cfg(feature = "std")]
impl std::error::Error for ResourceError {}

#[cfg(feature = "std")]
impl std::error::Error for SubscriptionError {}

#[cfg(feature = "std")]
impl std::error::Error for HardwareError {}
