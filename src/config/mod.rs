//! Configuration module for stepper-burst.
//!
//! Provides types for loading and validating driver configurations from TOML
//! files (with `std` feature) or pre-parsed data.

mod driver;
mod policy;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use driver::{DriverConfig, DriverModel, LineNames, DEFAULT_DUTY, DEFAULT_PERIOD};
pub use policy::RequestPolicy;
pub use system::SystemConfig;
pub use validation::validate_config;
pub(crate) use validation::validate_driver;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Hertz, Nanoseconds};
