//! Host fakes for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use stepper_burst::{BurstConfig, BurstGenerator, CompletionEvent, GeneratorId, HardwareProvider, IrqNumber};

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
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.drive(true);
        Ok(())
    }
}

impl StatefulOutputPin for FakePin {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.level())
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.level())
    }
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.level())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.level())
    }
}

#[derive(Debug, Default)]
pub struct Registers {
    pub duty_ns: u64,
    pub period_ns: u64,
    pub counters: BurstConfig,
    pub enabled: bool,
    pub runs: u32,
}

/// One-shot pulse generator with shared registers.
#[derive(Clone)]
pub struct FakeGenerator {
    id: GeneratorId,
    regs: Arc<Mutex<Registers>>,
}

impl FakeGenerator {
    pub fn new(id: u32) -> Self {
        Self {
            id: GeneratorId(id),
            regs: Arc::new(Mutex::new(Registers::default())),
        }
    }

    pub fn regs(&self) -> MutexGuard<'_, Registers> {
        self.regs.lock().unwrap()
    }

    /// Finish the current run and build the broadcast the hardware would raise.
    pub fn finish(&self) -> CompletionEvent {
        self.regs().enabled = false;
        CompletionEvent {
            source: self.id,
            enabled: false,
        }
    }
}

impl BurstGenerator for FakeGenerator {
    type Error = Infallible;

    fn id(&self) -> GeneratorId {
        self.id
    }

    fn configure(&mut self, duty_ns: u64, period_ns: u64) -> Result<(), Infallible> {
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

    fn enable(&mut self) -> Result<(), Infallible> {
        let mut regs = self.regs();
        regs.enabled = true;
        regs.runs += 1;
        Ok(())
    }

    fn disable(&mut self) {
        self.regs().enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.regs().enabled
    }
}

/// Board with named lines, generators and interrupt numbers.
#[derive(Default)]
pub struct Board {
    pub outputs: HashMap<String, FakePin>,
    pub inputs: HashMap<String, FakePin>,
    pub generators: HashMap<String, FakeGenerator>,
    pub irqs: HashMap<String, u32>,
    next_irq: u32,
}

impl Board {
    pub fn new() -> Self {
        Self {
            next_irq: 40,
            ..Self::default()
        }
    }

    /// Wire one driver: `<prefix>_ena`, `<prefix>_dir`, `<prefix>_pul` and
    /// two switches `<prefix>_sw1`, `<prefix>_sw2`.
    pub fn wire(mut self, prefix: &str, generator_id: u32) -> Self {
        for line in ["ena", "dir"] {
            self.outputs.insert(format!("{prefix}_{line}"), FakePin::new(false));
        }
        self.generators
            .insert(format!("{prefix}_pul"), FakeGenerator::new(generator_id));
        for switch in ["sw1", "sw2"] {
            let name = format!("{prefix}_{switch}");
            self.inputs.insert(name.clone(), FakePin::new(false));
            self.irqs.insert(name, self.next_irq);
            self.next_irq += 1;
        }
        self
    }

    pub fn output(&self, name: &str) -> &FakePin {
        &self.outputs[name]
    }

    pub fn input(&self, name: &str) -> &FakePin {
        &self.inputs[name]
    }

    pub fn pulse(&self, name: &str) -> &FakeGenerator {
        &self.generators[name]
    }

    pub fn irq(&self, name: &str) -> IrqNumber {
        IrqNumber(self.irqs[name])
    }
}

impl HardwareProvider for Board {
    type Output = FakePin;
    type Input = FakePin;
    type Generator = FakeGenerator;

    fn output_line(&mut self, name: &str, initial_high: bool) -> Option<FakePin> {
        let pin = self.outputs.get(name)?.clone();
        pin.drive(initial_high);
        Some(pin)
    }

    fn input_line(&mut self, name: &str) -> Option<FakePin> {
        self.inputs.get(name).cloned()
    }

    fn generator(&mut self, name: &str) -> Option<FakeGenerator> {
        self.generators.get(name).cloned()
    }

    fn request_edge_irq(&mut self, name: &str) -> Option<IrqNumber> {
        self.irqs.get(name).copied().map(IrqNumber)
    }
}
