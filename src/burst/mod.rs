//! Burst module for stepper-burst.
//!
//! Pulse-count encoding, the generator handle, and the controller that runs
//! the burst lifecycle.

mod controller;
mod encoder;
mod generator;
pub mod state;

pub use controller::{BurstController, BurstStatus};
pub use encoder::{encode, BurstConfig, PulseBurstEncoder, DEFAULT_CEILING};
pub use generator::{BurstGenerator, GeneratorId};
pub use state::{BurstPhase, Direction, MotorState};
