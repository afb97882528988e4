//! Completion handling for [`BurstController`].

use embedded_hal::digital::OutputPin;
use log::{debug, info};

use crate::burst::{BurstController, BurstGenerator, BurstPhase, GeneratorId};

use super::{CompletionEvent, CompletionListener, Notify};

impl<G, D> CompletionListener for BurstController<G, D>
where
    G: BurstGenerator + Send,
    D: OutputPin + Send,
{
    fn generator_id(&self) -> GeneratorId {
        BurstController::generator_id(self)
    }

    fn on_completion(&self, event: &CompletionEvent) -> Notify {
        let id = BurstController::generator_id(self);
        if event.source != id {
            return Notify::Ignored;
        }

        // Only the phase changes here; pending_count belongs to the command path.
        // A late duplicate must not end a burst that was re-armed since.
        let finished = self.with(|shared| {
            if shared.state.phase.is_active() && !shared.generator.is_enabled() {
                shared.state.phase = BurstPhase::Idle;
                true
            } else {
                false
            }
        });

        if finished {
            info!("{}: oneshot finished, enabled: {}", id, event.enabled);
        } else {
            debug!("{}: completion with no burst in flight", id);
        }
        self.publish_completion(*event);
        Notify::Claimed
    }
}
