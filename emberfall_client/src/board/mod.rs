use crate::clock::{ClockConfig, TurnClock};
use crate::effects::particles::ParticleConfig;
use crate::effects::{EffectConfig, EffectScheduler, PresentationTrigger};
use crate::networking::SnapshotInbox;
use crate::query::{CardRegistry, PresentationQuery};
use emberfall_lib::rules::GameStateSnapshot;
use layout::BoardLayout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

pub mod differ;
pub mod layout;

/// Tunables for the whole presentation engine.
#[derive(Debug, Clone, Default)]
pub struct PresentationConfig {
    pub effects: EffectConfig,
    pub particles: ParticleConfig,
    pub clock: ClockConfig,
    pub layout: BoardLayout,
}

/// The single entry point for new snapshots: diffs against the previous
/// one, feeds the scheduler and the clock, then stores the snapshot as the
/// new baseline. Everything else reads through [`PresentationQuery`].
///
/// Owned exclusively by the render-loop thread; the snapshot inbox is the
/// only cross-thread boundary.
pub struct BoardReconciler {
    previous: Option<Arc<GameStateSnapshot>>,
    scheduler: EffectScheduler,
    clock: TurnClock,
    layout: BoardLayout,
    registry: Arc<dyn CardRegistry>,
}

impl BoardReconciler {
    pub fn new(registry: Arc<dyn CardRegistry>, config: PresentationConfig) -> Self {
        Self {
            previous: None,
            scheduler: EffectScheduler::new(config.effects, config.particles),
            clock: TurnClock::new(config.clock),
            layout: config.layout,
            registry,
        }
    }

    /// Reconciles one snapshot. Diffing, scheduling, and clock sync all
    /// complete before this returns, so a query issued afterwards never
    /// sees a partial update.
    pub fn on_snapshot(&mut self, snapshot: Arc<GameStateSnapshot>, now: Instant) {
        let events = differ::diff(self.previous.as_deref(), &snapshot);
        if !events.is_empty() {
            debug!(count = events.len(), "derived diff events");
        }
        self.scheduler
            .apply(&events, self.previous.as_deref(), &snapshot, &self.layout);
        self.clock.on_snapshot(&snapshot, now);
        self.previous = Some(snapshot);
    }

    /// Drains at most the single newest pending snapshot. Called once per
    /// frame; intermediate snapshots superseded while we weren't looking
    /// are never reconciled.
    pub fn pump(&mut self, inbox: &mut SnapshotInbox, now: Instant) -> bool {
        match inbox.take_latest() {
            Some(snapshot) => {
                self.on_snapshot(snapshot, now);
                true
            }
            None => false,
        }
    }

    /// Per-frame tick for effects and the countdown.
    pub fn advance(&mut self, dt: Duration, now: Instant) {
        self.scheduler.advance(dt);
        self.clock.tick(now);
    }

    /// One-shot sound/particle cues accumulated since the last drain.
    pub fn drain_triggers(&mut self) -> Vec<PresentationTrigger> {
        self.scheduler.drain_triggers()
    }

    /// Read-only view for the renderer; cheap to construct every frame.
    pub fn query(&self) -> PresentationQuery<'_> {
        PresentationQuery::new(
            self.previous.as_deref(),
            &self.scheduler,
            &self.clock,
            &self.layout,
            self.registry.as_ref(),
        )
    }
}
