//! Host fakes shared by the unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use crate::burst::{BurstConfig, BurstGenerator, GeneratorId};
use crate::completion::CompletionEvent;

/// Pin whose level is shared with every clone.
#[derive(Clone, Default)]
pub struct FakePin {
    level: Arc<AtomicBool>,
}

impl FakePin {
    pub fn new(high: bool) -> Self {
        Self {
            level: Arc::new(AtomicBool::new(high)),
        }
    }

    pub fn level(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }

    pub fn drive(&self, high: bool) {
        self.level.store(high, Ordering::SeqCst);
    }
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

impl StatefulOutputPin for FakePin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level())
    }
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level())
    }
}

#[derive(Debug, Default)]
pub struct GeneratorRegisters {
    pub duty_ns: u64,
    pub period_ns: u64,
    pub counters: BurstConfig,
    pub enabled: bool,
    pub enable_calls: u32,
    pub fail_enable: bool,
}

/// Generator whose registers are shared with every clone.
#[derive(Clone)]
pub struct FakeGenerator {
    id: GeneratorId,
    regs: Arc<Mutex<GeneratorRegisters>>,
}

impl FakeGenerator {
    pub fn new(id: u32) -> Self {
        Self {
            id: GeneratorId(id),
            regs: Arc::new(Mutex::new(GeneratorRegisters::default())),
        }
    }

    pub fn regs(&self) -> std::sync::MutexGuard<'_, GeneratorRegisters> {
        self.regs.lock().unwrap()
    }

    /// Hardware side of a finished one-shot run.
    pub fn finish(&self) -> CompletionEvent {
        self.regs().enabled = false;
        CompletionEvent {
            source: self.id,
            enabled: false,
        }
    }
}

impl BurstGenerator for FakeGenerator {
    type Error = ();

    fn id(&self) -> GeneratorId {
        self.id
    }

    fn configure(&mut self, duty_ns: u64, period_ns: u64) -> Result<(), ()> {
        let mut regs = self.regs();
        regs.duty_ns = duty_ns;
        regs.period_ns = period_ns;
        Ok(())
    }

    fn period_ns(&self) -> u64 {
        self.regs().period_ns
    }

    fn set_period_ns(&mut self, period_ns: u64) {
        self.regs().period_ns = period_ns;
    }

    fn load(&mut self, burst: &BurstConfig) {
        self.regs().counters = *burst;
    }

    fn counters(&self) -> BurstConfig {
        self.regs().counters
    }

    fn enable(&mut self) -> Result<(), ()> {
        let mut regs = self.regs();
        regs.enable_calls += 1;
        if regs.fail_enable {
            return Err(());
        }
        regs.enabled = true;
        Ok(())
    }

    fn disable(&mut self) {
        self.regs().enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.regs().enabled
    }
}
