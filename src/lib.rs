//! # stepper-burst
//!
//! Pulse-burst control core for DM542 / TB6600 class stepper drivers with
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Burst encoding**: Any pulse count mapped onto a generator that can only
//!   emit a bounded number of pulses per run, plus automatic repeat cycles
//! - **Lifecycle tracking**: Idle, armed and running phases behind one
//!   interrupt-safe lock
//! - **Completion bus**: One broadcast per finished run, claimed by the driver
//!   that owns the generator
//! - **Limit switches**: Edge events queued without touching burst state
//! - **Configuration-driven**: Drivers described in TOML files
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_burst::{CompletionBus, StepperDriver};
//!
//! static BUS: CompletionBus<'static, 4> = CompletionBus::new();
//!
//! let config = stepper_burst::load_config("drivers.toml")?;
//! let driver = StepperDriver::probe(config.driver("x_axis").unwrap(), &mut board)?;
//! let driver: &'static _ = Box::leak(Box::new(driver));
//! driver.attach(&BUS)?;
//!
//! driver.store_named("pulse_count", "-1200\n")?;
//! driver.store_named("pwm_enable", "1\n")?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt formatting for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod burst;
pub mod completion;
pub mod config;
pub mod driver;
pub mod error;
pub mod hw;
pub mod limit;

mod text;

#[cfg(test)]
mod test_support;

// Re-exports for ergonomic API
pub use burst::{
    encode, BurstConfig, BurstController, BurstGenerator, BurstPhase, BurstStatus, Direction,
    GeneratorId, MotorState, PulseBurstEncoder, DEFAULT_CEILING,
};
pub use completion::{CompletionBus, CompletionEvent, CompletionListener, Notify};
pub use config::{validate_config, DriverConfig, DriverModel, RequestPolicy, SystemConfig};
pub use driver::{Attribute, AttributeValue, ProbedDriver, StepperDriver, StepperDriverBuilder};
pub use error::{Error, Result};
pub use hw::{HardwareProvider, InputLine, IrqNumber, OutputLine, Unconnected};
pub use limit::{IrqReturn, LimitSwitchEvent, LimitSwitchMonitor, SwitchId};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Hertz, Nanoseconds};
