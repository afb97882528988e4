//! Process-wide completion broadcast.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;
use log::debug;

use crate::burst::GeneratorId;
use crate::error::{ResourceError, Result};

use super::{CompletionEvent, CompletionListener, Notify};

#[derive(Clone, Copy)]
struct Subscription<'a> {
    key: GeneratorId,
    listener: &'a dyn CompletionListener,
}

/// Publish/subscribe channel for burst completions.
///
/// Listeners are keyed by the generator they own, at most one per generator.
/// A broadcast still reaches every listener; each one filters for itself.
/// Delivery order between listeners is unspecified.
///
/// ```rust,ignore
/// static BUS: CompletionBus<'static, 4> = CompletionBus::new();
///
/// driver.attach(&BUS)?;
/// // from the pulse generator's done interrupt:
/// BUS.broadcast(CompletionEvent { source: GeneratorId(3), enabled: false });
/// ```
pub struct CompletionBus<'a, const N: usize = 8> {
    listeners: Mutex<CriticalSectionRawMutex, RefCell<Vec<Subscription<'a>, N>>>,
}

impl<'a, const N: usize> CompletionBus<'a, N> {
    /// Create an empty bus.
    pub const fn new() -> Self {
        Self {
            listeners: Mutex::new(RefCell::new(Vec::new())),
        }
    }

    /// Register a listener for the lifetime of the bus borrow.
    ///
    /// # Errors
    ///
    /// `ResourceUnavailable` if the generator already has a listener or the
    /// bus is full.
    pub fn subscribe(&self, listener: &'a dyn CompletionListener) -> Result<()> {
        let key = listener.generator_id();
        self.listeners.lock(|cell| -> Result<()> {
            let mut listeners = cell.borrow_mut();
            if listeners.iter().any(|s| s.key == key) {
                return Err(ResourceError::GeneratorAlreadySubscribed(key.0).into());
            }
            listeners
                .push(Subscription { key, listener })
                .map_err(|_| ResourceError::BusFull.into())
        })
    }

    /// Remove the listener for a generator. Returns whether one was registered.
    pub fn unsubscribe(&self, key: GeneratorId) -> bool {
        self.listeners.lock(|cell| {
            let mut listeners = cell.borrow_mut();
            match listeners.iter().position(|s| s.key == key) {
                Some(index) => {
                    listeners.swap_remove(index);
                    true
                }
                None => false,
            }
        })
    }

    /// Deliver a completion to every listener.
    ///
    /// Returns how many listeners claimed it.
    pub fn broadcast(&self, event: CompletionEvent) -> usize {
        // Listeners run outside the bus lock so they may unsubscribe.
        let snapshot = self.listeners.lock(|cell| cell.borrow().clone());

        let claimed = snapshot
            .iter()
            .filter(|s| s.listener.on_completion(&event) == Notify::Claimed)
            .count();

        if claimed == 0 {
            debug!("{}: completion with no listener", event.source);
        }
        claimed
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.lock(|cell| cell.borrow().len())
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for CompletionBus<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use core::sync::atomic::{AtomicU32, Ordering};

    struct Counter {
        id: GeneratorId,
        seen: AtomicU32,
        claimed: AtomicU32,
    }

    impl Counter {
        fn new(id: u32) -> Self {
            Self {
                id: GeneratorId(id),
                seen: AtomicU32::new(0),
                claimed: AtomicU32::new(0),
            }
        }
    }

    impl CompletionListener for Counter {
        fn generator_id(&self) -> GeneratorId {
            self.id
        }

        fn on_completion(&self, event: &CompletionEvent) -> Notify {
            self.seen.fetch_add(1, Ordering::SeqCst);
            if event.source != self.id {
                return Notify::Ignored;
            }
            self.claimed.fetch_add(1, Ordering::SeqCst);
            Notify::Claimed
        }
    }

    fn done(id: u32) -> CompletionEvent {
        CompletionEvent {
            source: GeneratorId(id),
            enabled: false,
        }
    }

    #[test]
    fn test_broadcast_reaches_every_listener() {
        let a = Counter::new(1);
        let b = Counter::new(2);
        let bus: CompletionBus<'_, 4> = CompletionBus::new();
        bus.subscribe(&a).unwrap();
        bus.subscribe(&b).unwrap();

        assert_eq!(bus.broadcast(done(2)), 1);

        assert_eq!(a.seen.load(Ordering::SeqCst), 1);
        assert_eq!(a.claimed.load(Ordering::SeqCst), 0);
        assert_eq!(b.claimed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_source_claimed_by_nobody() {
        let a = Counter::new(1);
        let bus: CompletionBus<'_, 4> = CompletionBus::new();
        bus.subscribe(&a).unwrap();

        assert_eq!(bus.broadcast(done(9)), 0);
        assert_eq!(a.seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_generator_rejected() {
        let a = Counter::new(1);
        let again = Counter::new(1);
        let bus: CompletionBus<'_, 4> = CompletionBus::new();
        bus.subscribe(&a).unwrap();

        assert_eq!(
            bus.subscribe(&again),
            Err(Error::ResourceUnavailable(
                ResourceError::GeneratorAlreadySubscribed(1)
            ))
        );
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn test_full_bus_rejected() {
        let a = Counter::new(1);
        let b = Counter::new(2);
        let bus: CompletionBus<'_, 1> = CompletionBus::new();
        bus.subscribe(&a).unwrap();

        assert_eq!(
            bus.subscribe(&b),
            Err(Error::ResourceUnavailable(ResourceError::BusFull))
        );
    }

    #[test]
    fn test_unsubscribe() {
        let a = Counter::new(1);
        let bus: CompletionBus<'_, 4> = CompletionBus::new();
        bus.subscribe(&a).unwrap();

        assert!(bus.unsubscribe(GeneratorId(1)));
        assert!(!bus.unsubscribe(GeneratorId(1)));
        assert!(bus.is_empty());
        assert_eq!(bus.broadcast(done(1)), 0);
        assert_eq!(a.seen.load(Ordering::SeqCst), 0);
    }
}
