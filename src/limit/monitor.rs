//! Limit-switch monitor.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embedded_hal::digital::InputPin;
use log::{info, warn};

use crate::hw::{InputLine, IrqNumber};

use super::{IrqReturn, LimitSwitchEvent, SwitchId};

/// Event queue depth used when none is given.
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

/// Which switches are being watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coverage {
    /// Switch A has a line and an interrupt.
    pub a: bool,
    /// Switch B has a line and an interrupt.
    pub b: bool,
}

impl Coverage {
    /// Both switches watched.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.a && self.b
    }
}

struct Watched<P> {
    line: InputLine<P>,
    irq: IrqNumber,
}

struct Watchers<A, B> {
    a: Option<Watched<A>>,
    b: Option<Watched<B>>,
    dropped: u32,
}

/// Watches up to two limit switches and queues their edges.
///
/// Call [`handle_irq`](Self::handle_irq) from the interrupt handler of either
/// line; consume events with [`try_next_event`](Self::try_next_event) or the
/// async [`events`](Self::events) channel.
pub struct LimitSwitchMonitor<A, B, const N: usize = DEFAULT_EVENT_CAPACITY> {
    watchers: Mutex<CriticalSectionRawMutex, RefCell<Watchers<A, B>>>,
    events: Channel<CriticalSectionRawMutex, LimitSwitchEvent, N>,
}

impl<A: InputPin, B: InputPin, const N: usize> LimitSwitchMonitor<A, B, N> {
    /// Create a monitor watching nothing.
    pub fn new() -> Self {
        Self {
            watchers: Mutex::new(RefCell::new(Watchers {
                a: None,
                b: None,
                dropped: 0,
            })),
            events: Channel::new(),
        }
    }

    /// Watch switch A on the given line and interrupt.
    pub fn watch_a(&self, line: InputLine<A>, irq: IrqNumber) {
        self.watchers
            .lock(|cell| cell.borrow_mut().a = Some(Watched { line, irq }));
    }

    /// Watch switch B on the given line and interrupt.
    pub fn watch_b(&self, line: InputLine<B>, irq: IrqNumber) {
        self.watchers
            .lock(|cell| cell.borrow_mut().b = Some(Watched { line, irq }));
    }

    /// Which switches are watched.
    pub fn coverage(&self) -> Coverage {
        self.watchers.lock(|cell| {
            let watchers = cell.borrow();
            Coverage {
                a: watchers.a.is_some(),
                b: watchers.b.is_some(),
            }
        })
    }

    /// Interrupt entry point for both switch lines.
    ///
    /// Identifies the switch by interrupt number, reads its level and queues
    /// an event. Interrupts that belong to neither switch are left alone.
    pub fn handle_irq(&self, irq: IrqNumber) -> IrqReturn {
        let reading = self.watchers.lock(|cell| {
            let mut watchers = cell.borrow_mut();
            if let Some(w) = watchers.a.as_mut().filter(|w| w.irq == irq) {
                return Some((SwitchId::A, w.line.level()));
            }
            if let Some(w) = watchers.b.as_mut().filter(|w| w.irq == irq) {
                return Some((SwitchId::B, w.line.level()));
            }
            None
        });

        match reading {
            None => IrqReturn::None,
            Some((switch, Ok(level))) => {
                info!("{} triggered, state: {}", switch, u8::from(level));
                self.push(LimitSwitchEvent { switch, level });
                IrqReturn::Handled
            }
            Some((switch, Err(e))) => {
                warn!("{}: failed to read level: {}", switch, e);
                IrqReturn::Handled
            }
        }
    }

    fn push(&self, event: LimitSwitchEvent) {
        if self.events.try_send(event).is_err() {
            let dropped = self.watchers.lock(|cell| {
                let mut watchers = cell.borrow_mut();
                watchers.dropped = watchers.dropped.saturating_add(1);
                watchers.dropped
            });
            warn!("{}: event queue full, {} edges dropped", event.switch, dropped);
        }
    }

    /// Next queued event, if any.
    pub fn try_next_event(&self) -> Option<LimitSwitchEvent> {
        self.events.try_receive().ok()
    }

    /// Event channel, for async consumers.
    pub fn events(&self) -> &Channel<CriticalSectionRawMutex, LimitSwitchEvent, N> {
        &self.events
    }

    /// Edges lost to a full queue.
    pub fn dropped_events(&self) -> u32 {
        self.watchers.lock(|cell| cell.borrow().dropped)
    }
}

impl<A: InputPin, B: InputPin, const N: usize> Default for LimitSwitchMonitor<A, B, N> {
    fn default() -> Self {
        Self::new()
    }
}
