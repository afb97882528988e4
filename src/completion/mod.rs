//! Burst completion notifications.
//!
//! The hardware burst subsystem raises one broadcast per finished run, for
//! whichever generator finished. Every listener on the [`CompletionBus`] sees
//! every broadcast and claims only its own.

mod bus;
mod notifier;

use crate::burst::GeneratorId;

pub use bus::CompletionBus;

/// One finished hardware run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompletionEvent {
    /// Generator that finished.
    pub source: GeneratorId,
    /// Generator enabled flag observed at completion.
    pub enabled: bool,
}

/// Listener verdict on a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notify {
    /// The event was for this listener's generator.
    Claimed,
    /// Not this listener's generator; left for the others.
    Ignored,
}

/// Receives every completion broadcast on a bus.
pub trait CompletionListener: Sync {
    /// Generator this listener owns; used as its bus key.
    fn generator_id(&self) -> GeneratorId;

    /// Handle one broadcast. Must return [`Notify::Ignored`] without side
    /// effects when `event.source` is not this listener's generator.
    fn on_completion(&self, event: &CompletionEvent) -> Notify;
}
