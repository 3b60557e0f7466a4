use crate::board::layout::BoardLayout;
use crate::clock::TurnClock;
use crate::effects::particles::Particle;
use crate::effects::{CardTransform, EffectScheduler, PowerDeltaView};
use crate::geom::Vec2;
use emberfall_lib::rules::cards::{CardId, CardIdentity};
use emberfall_lib::rules::{GameStateSnapshot, PlayerRef, ZoneKind, ZoneRef, ZoneSlot};

/// Read-only lookup from a card identifier to its display metadata.
/// Injected rather than global so tests can supply a fixed fake registry;
/// an unresolved id is not an error, the renderer shows a placeholder.
pub trait CardRegistry: Send + Sync {
    fn resolve(&self, id: CardId) -> Option<CardDisplay>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardDisplay {
    pub name: String,
    /// Opaque art handle; picking the concrete asset is the renderer's job.
    pub art_tag: String,
}

/// Zones in back-to-front draw order; hands render on top of the rows.
const DRAW_ORDER: [(PlayerRef, ZoneKind); 10] = [
    (PlayerRef::Remote, ZoneKind::Siege),
    (PlayerRef::Remote, ZoneKind::Ranged),
    (PlayerRef::Remote, ZoneKind::Melee),
    (PlayerRef::Local, ZoneKind::Melee),
    (PlayerRef::Local, ZoneKind::Ranged),
    (PlayerRef::Local, ZoneKind::Siege),
    (PlayerRef::Remote, ZoneKind::Discard),
    (PlayerRef::Local, ZoneKind::Discard),
    (PlayerRef::Remote, ZoneKind::Hand),
    (PlayerRef::Local, ZoneKind::Hand),
];

/// Per-frame read facade over the reconciler's state. All methods are pure
/// and side-effect free; callable any number of times per frame.
pub struct PresentationQuery<'a> {
    snapshot: Option<&'a GameStateSnapshot>,
    scheduler: &'a EffectScheduler,
    clock: &'a TurnClock,
    layout: &'a BoardLayout,
    registry: &'a dyn CardRegistry,
}

impl<'a> PresentationQuery<'a> {
    pub(crate) fn new(
        snapshot: Option<&'a GameStateSnapshot>,
        scheduler: &'a EffectScheduler,
        clock: &'a TurnClock,
        layout: &'a BoardLayout,
        registry: &'a dyn CardRegistry,
    ) -> Self {
        Self {
            snapshot,
            scheduler,
            clock,
            layout,
            registry,
        }
    }

    /// Current visual transform of a card in a zone: the active effect if
    /// one drives the card, otherwise its static layout slot, otherwise
    /// `None` for a card that simply isn't there.
    pub fn transform_of(&self, card: CardIdentity, zone: ZoneRef) -> Option<CardTransform> {
        if let Some(animated) = self.scheduler.transform_of(card, zone) {
            return Some(animated);
        }

        let snapshot = self.snapshot?;
        let cards = snapshot.zone(zone);
        let index = cards.iter().position(|c| c.identity == card)?;
        let resting = self
            .layout
            .slot_position(ZoneSlot::new(zone, index), cards.len());
        Some(CardTransform::at(resting))
    }

    /// Locally smoothed turn countdown, in whole seconds.
    pub fn remaining_seconds(&self) -> u32 {
        self.clock.remaining_seconds()
    }

    /// The card under the pointer this frame, recomputed from the frame's
    /// transforms; no hover state is retained anywhere.
    pub fn card_at(&self, pointer: Vec2) -> Option<CardIdentity> {
        let snapshot = self.snapshot?;
        let mut hits = Vec::new();
        for (side, kind) in DRAW_ORDER {
            let zone = ZoneRef::new(side, kind);
            for card in snapshot.zone(zone) {
                if let Some(transform) = self.transform_of(card.identity, zone) {
                    hits.push((card.identity, transform.position, transform.scale));
                }
            }
        }
        self.layout.card_at(pointer, hits)
    }

    pub fn display_of(&self, id: CardId) -> Option<CardDisplay> {
        self.registry.resolve(id)
    }

    /// Floating power-delta readouts currently in flight.
    pub fn power_deltas(&self) -> Vec<PowerDeltaView> {
        self.scheduler.power_deltas()
    }

    /// Ambient weather particles for the renderer.
    pub fn particles(&self) -> &[Particle] {
        self.scheduler.ambient().particles()
    }
}
