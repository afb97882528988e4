//! Burst controller.
//!
//! Owns the command-side [`MotorState`], the stored [`BurstConfig`], the
//! direction line and the generator. All of it sits behind one
//! critical-section mutex so commands and the completion callback never see a
//! half-updated state.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embedded_hal::digital::OutputPin;
use log::{debug, info, warn};

use crate::completion::CompletionEvent;
use crate::config::RequestPolicy;
use crate::error::{ArgumentError, HardwareError, Result};
use crate::hw::OutputLine;

use super::encoder::{BurstConfig, PulseBurstEncoder};
use super::generator::{BurstGenerator, GeneratorId};
use super::state::{BurstPhase, Direction, MotorState};

/// Snapshot returned by [`BurstController::query_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BurstStatus {
    /// Generator running.
    pub enabled: bool,
    /// Pulse period in nanoseconds.
    pub period_ns: u64,
    /// Pulses described by the generator's live counters.
    pub pulse_progress: u64,
}

pub(crate) struct Shared<G, D> {
    pub(crate) generator: G,
    direction_line: OutputLine<D>,
    pub(crate) state: MotorState,
    burst: BurstConfig,
}

impl<G: BurstGenerator, D: OutputPin> Shared<G, D> {
    fn arm(&mut self) -> Result<bool> {
        let id = self.generator.id();
        if self.state.phase.is_active() || self.generator.is_enabled() {
            debug!("{}: already enabled, arm ignored", id);
            return Ok(false);
        }
        if self.state.pending_count == 0 {
            debug!("{}: no pending pulses, arm ignored", id);
            return Ok(false);
        }

        self.state.phase = BurstPhase::Armed;
        self.generator.load(&self.burst);
        if let Err(e) = self.generator.enable() {
            self.state.phase = BurstPhase::Idle;
            warn!("{}: failed to start burst: {:?}", id, e);
            return Err(HardwareError::GeneratorError.into());
        }
        self.state.phase = BurstPhase::Running;

        info!(
            "{}: burst of {} pulses started ({:?})",
            id, self.state.pending_count, self.state.direction
        );
        self.state.pending_count = 0;
        Ok(true)
    }

    fn disarm(&mut self) -> bool {
        if !self.state.phase.is_active() && !self.generator.is_enabled() {
            return false;
        }
        self.generator.disable();
        self.state.phase = BurstPhase::Idle;
        info!("{}: burst stopped", self.generator.id());
        true
    }
}

/// Drives one pulse generator through its burst lifecycle.
pub struct BurstController<G, D> {
    id: GeneratorId,
    encoder: PulseBurstEncoder,
    duty_ns: u64,
    policy: RequestPolicy,
    shared: Mutex<CriticalSectionRawMutex, RefCell<Shared<G, D>>>,
    completed: Signal<CriticalSectionRawMutex, CompletionEvent>,
}

impl<G: BurstGenerator, D: OutputPin> BurstController<G, D> {
    /// Create an idle controller.
    pub fn new(generator: G, direction_line: OutputLine<D>, encoder: PulseBurstEncoder) -> Self {
        Self {
            id: generator.id(),
            encoder,
            duty_ns: 0,
            policy: RequestPolicy::default(),
            shared: Mutex::new(RefCell::new(Shared {
                generator,
                direction_line,
                state: MotorState::default(),
                burst: BurstConfig::default(),
            })),
            completed: Signal::new(),
        }
    }

    /// Set how requests arriving mid-burst are handled.
    pub fn with_policy(mut self, policy: RequestPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the pulse high time; periods must exceed it.
    pub fn with_duty(mut self, duty_ns: u64) -> Self {
        self.duty_ns = duty_ns;
        self
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut Shared<G, D>) -> R) -> R {
        self.shared.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Identity of the owned generator.
    #[inline]
    pub fn generator_id(&self) -> GeneratorId {
        self.id
    }

    /// Encoder in use.
    #[inline]
    pub fn encoder(&self) -> &PulseBurstEncoder {
        &self.encoder
    }

    /// Request policy in use.
    #[inline]
    pub fn policy(&self) -> RequestPolicy {
        self.policy
    }

    /// Copy of the command-side state.
    pub fn motor_state(&self) -> MotorState {
        self.with(|shared| shared.state)
    }

    /// Configuration the next arm will load.
    pub fn stored_burst(&self) -> BurstConfig {
        self.with(|shared| shared.burst)
    }

    /// Set the direction and pulse count of the next burst.
    ///
    /// The sign picks the direction. Zero does nothing. With
    /// [`RequestPolicy::Overwrite`] a request while a burst is in flight
    /// replaces the stored configuration and flips the direction line under
    /// the running burst.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the count cannot be encoded or the policy rejects
    /// mid-burst requests; `Hardware` if the direction line fails.
    pub fn set_request(&self, count: i64) -> Result<()> {
        if count == 0 {
            return Ok(());
        }

        let total = count.unsigned_abs();
        let burst = self.encoder.encode(total)?;
        let pending =
            i64::try_from(total).map_err(|_| ArgumentError::PulseCountOverflow(total))?;
        let direction = Direction::of(count);

        self.with(|shared| -> Result<()> {
            if shared.state.phase.is_active() {
                match self.policy {
                    RequestPolicy::Reject => return Err(ArgumentError::BurstInFlight.into()),
                    RequestPolicy::Overwrite => {
                        warn!("{}: request of {} replaces the stored burst mid-run", self.id, count)
                    }
                }
            }

            shared.direction_line.set(direction.is_forward())?;
            shared.state.direction = direction;
            shared.state.pending_count = pending;
            shared.burst = burst;
            Ok(())
        })
    }

    /// Arm (`true`) or stop (`false`) the generator.
    ///
    /// Returns whether anything changed. Arming without pending pulses or
    /// while already enabled, and stopping while idle, are silent no-ops.
    ///
    /// # Errors
    ///
    /// `Hardware` if the generator refuses to start; the pending request is
    /// kept and the controller stays idle.
    pub fn set_enabled(&self, enable: bool) -> Result<bool> {
        self.with(|shared| {
            if enable {
                shared.arm()
            } else {
                Ok(shared.disarm())
            }
        })
    }

    /// Change the pulse period.
    ///
    /// Applies in any phase; a running burst picks it up on its next
    /// internally timed tick.
    pub fn set_period(&self, period_ns: u64) -> Result<()> {
        if period_ns == 0 {
            return Err(ArgumentError::ZeroPeriod.into());
        }
        if period_ns <= self.duty_ns {
            return Err(ArgumentError::PeriodBelowDuty {
                period_ns,
                duty_ns: self.duty_ns,
            }
            .into());
        }

        self.with(|shared| shared.generator.set_period_ns(period_ns));
        Ok(())
    }

    /// Read generator status without side effects.
    pub fn query_state(&self) -> BurstStatus {
        let ceiling = self.encoder.ceiling();
        self.with(|shared| BurstStatus {
            enabled: shared.generator.is_enabled(),
            period_ns: shared.generator.period_ns(),
            pulse_progress: shared.generator.counters().total_pulses(ceiling),
        })
    }

    /// Take the last completion published for this generator, if any.
    pub fn take_completion(&self) -> Option<CompletionEvent> {
        self.completed.try_take()
    }

    /// Completion signal, for async waiters.
    pub fn completion_signal(&self) -> &Signal<CriticalSectionRawMutex, CompletionEvent> {
        &self.completed
    }

    pub(crate) fn publish_completion(&self, event: CompletionEvent) {
        self.completed.signal(event);
    }

    /// Stop the generator if it is running.
    pub fn shutdown(&self) {
        self.with(|shared| {
            if shared.generator.is_enabled() {
                shared.generator.disable();
            }
            shared.state.phase = BurstPhase::Idle;
        });
    }
}
