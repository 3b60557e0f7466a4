use crate::board::differ::DiffEvent;
use crate::board::layout::BoardLayout;
use crate::geom::Vec2;
use easing::EaseFunction;
use emberfall_lib::rules::cards::{CardCategory, CardIdentity, CardSnapshot, Rarity};
use emberfall_lib::rules::{GameStateSnapshot, PlayerRef, ZoneKind, ZoneRef, ZoneSlot};
use particles::{AmbientParticles, ParticleConfig};
use std::time::Duration;
use tracing::debug;

pub mod easing;
pub mod particles;

/// Visual state of one card (or card-shaped overlay) at one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CardTransform {
    pub position: Vec2,
    pub scale: f32,
    pub opacity: f32,
}

impl CardTransform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Entrance,
    UniqueReveal,
    Exit,
    PowerDelta,
    ComboFlare,
    TurnBanner,
    MatchOutcome,
}

/// What an effect is attached to. Card effects carry their target slot so
/// the same card animating into two different slots counts as two logical
/// effects; board- and row-level effects dedup on their own scope.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EffectTarget {
    Card { card: CardIdentity, slot: ZoneSlot },
    Row(ZoneRef),
    Board,
}

/// Composite identity of one logical effect instance; scheduling a key
/// that is already active replaces the running effect instead of
/// duplicating it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EffectKey {
    pub target: EffectTarget,
    pub kind: EffectKind,
}

/// One-shot cue handed to the sound/particle collaborator, which picks the
/// concrete asset; no asset is ever named here.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationTrigger {
    pub kind: TriggerKind,
    pub position: Vec2,
    pub rarity: Option<Rarity>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TriggerKind {
    CardPlaced,
    UniqueRevealed,
    CardRemoved,
    PowerRaised,
    PowerLowered,
    ComboFlared,
    TurnPassed,
    WeatherShifted,
    MatchDecided,
}

#[derive(Debug, Clone)]
enum Motion {
    /// Move from `from` to `to` with a slight fade-in.
    Slide {
        from: Vec2,
        to: Vec2,
        ease: EaseFunction,
    },
    /// Fly to the board center, grow, and vanish near the end.
    FlyToCenter { from: Vec2, center: Vec2 },
    /// Floating delta number rising from a card.
    FloatUp { from: Vec2, rise: f32, delta: i32 },
    /// Fade while sinking out of the row.
    DropOut { from: Vec2, fall: f32 },
    /// Stay in place, swelling slightly; fades in and out at the edges.
    Hold { at: Vec2, grow: f32 },
}

impl Motion {
    fn transform_at(&self, t: f32) -> CardTransform {
        match *self {
            Motion::Slide { from, to, ease } => CardTransform {
                position: from.lerp(to, ease.sample(t)),
                scale: 1.0,
                opacity: (0.25 + 0.75 * t).min(1.0),
            },
            Motion::FlyToCenter { from, center } => {
                let k = EaseFunction::QuarticOut.sample(t);
                CardTransform {
                    position: from.lerp(center, k),
                    scale: 1.0 + 0.35 * k,
                    opacity: if t > 0.7 { (1.0 - t) / 0.3 } else { 1.0 },
                }
            }
            Motion::FloatUp { from, rise, .. } => CardTransform {
                position: from + Vec2::new(0.0, -rise * EaseFunction::QuadraticOut.sample(t)),
                scale: 1.0,
                opacity: 1.0 - t,
            },
            Motion::DropOut { from, fall } => CardTransform {
                position: from + Vec2::new(0.0, fall * EaseFunction::QuadraticOut.sample(t)),
                scale: 1.0,
                opacity: 1.0 - t,
            },
            Motion::Hold { at, grow } => CardTransform {
                position: at,
                scale: 1.0 + grow * EaseFunction::QuadraticOut.sample(t),
                opacity: (4.0 * t).min(4.0 * (1.0 - t)).min(1.0),
            },
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveEffect {
    key: EffectKey,
    elapsed: f32,
    duration: f32,
    motion: Motion,
}

impl ActiveEffect {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Floating power-delta readout for the renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PowerDeltaView {
    pub card: CardIdentity,
    pub zone: ZoneRef,
    pub delta: i32,
    pub transform: CardTransform,
}

#[derive(Debug, Clone)]
pub struct EffectConfig {
    /// Cap on concurrent scheduled effects, ambient particles excluded.
    pub max_active: usize,
    pub entrance_secs: f32,
    pub reveal_secs: f32,
    pub exit_secs: f32,
    pub power_delta_secs: f32,
    pub combo_secs: f32,
    pub banner_secs: f32,
    pub outcome_secs: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            max_active: 8,
            entrance_secs: 0.65,
            reveal_secs: 1.0,
            exit_secs: 0.5,
            power_delta_secs: 0.9,
            combo_secs: 0.8,
            banner_secs: 1.2,
            outcome_secs: 2.5,
        }
    }
}

/// Owns every active presentation effect, keyed by composite identity,
/// with a resource cap and per-slice ambient rate limiting.
pub struct EffectScheduler {
    config: EffectConfig,
    active: Vec<ActiveEffect>,
    triggers: Vec<PresentationTrigger>,
    ambient: AmbientParticles,
}

impl EffectScheduler {
    pub fn new(config: EffectConfig, particle_config: ParticleConfig) -> Self {
        Self {
            config,
            active: Vec::new(),
            triggers: Vec::new(),
            ambient: AmbientParticles::new(particle_config),
        }
    }

    /// Maps one reconciliation batch to effect instances. `old` supplies
    /// departure positions, `new` supplies arrival positions.
    pub fn apply(
        &mut self,
        events: &[DiffEvent],
        old: Option<&GameStateSnapshot>,
        new: &GameStateSnapshot,
        layout: &BoardLayout,
    ) {
        for event in events {
            match event {
                DiffEvent::Entered {
                    card,
                    zone,
                    from_hand_like,
                } => self.schedule_entrance(card, *zone, *from_hand_like, new, layout),
                DiffEvent::Left { card, zone } => self.schedule_exit(card, *zone, old, layout),
                DiffEvent::PowerChanged {
                    card,
                    zone,
                    old_power,
                    new_power,
                } => self.schedule_power_delta(card, *zone, new_power - old_power, new, layout),
                DiffEvent::TurnChanged { .. } => {
                    self.schedule(
                        EffectKey {
                            target: EffectTarget::Board,
                            kind: EffectKind::TurnBanner,
                        },
                        self.config.banner_secs,
                        Motion::Hold {
                            at: layout.center(),
                            grow: 0.08,
                        },
                    );
                    self.push_trigger(TriggerKind::TurnPassed, layout.center(), None);
                }
                DiffEvent::WeatherChanged { to, .. } => {
                    self.ambient.set_mode(*to);
                    self.push_trigger(TriggerKind::WeatherShifted, layout.center(), None);
                }
                DiffEvent::MatchEnded { .. } => {
                    self.schedule(
                        EffectKey {
                            target: EffectTarget::Board,
                            kind: EffectKind::MatchOutcome,
                        },
                        self.config.outcome_secs,
                        Motion::Hold {
                            at: layout.center(),
                            grow: 0.15,
                        },
                    );
                    self.push_trigger(TriggerKind::MatchDecided, layout.center(), None);
                }
            }
        }

        self.schedule_combos(events, layout);
    }

    /// Two or more cards entering one row in the same batch flare the row
    /// once.
    fn schedule_combos(&mut self, events: &[DiffEvent], layout: &BoardLayout) {
        for side in PlayerRef::BOTH {
            for kind in [ZoneKind::Melee, ZoneKind::Ranged, ZoneKind::Siege] {
                let zone = ZoneRef::new(side, kind);
                let entered = events
                    .iter()
                    .filter(
                        |e| matches!(e, DiffEvent::Entered { zone: z, .. } if *z == zone),
                    )
                    .count();
                if entered >= 2 {
                    let at = layout.zone_anchor(zone);
                    self.schedule(
                        EffectKey {
                            target: EffectTarget::Row(zone),
                            kind: EffectKind::ComboFlare,
                        },
                        self.config.combo_secs,
                        Motion::Hold { at, grow: 0.05 },
                    );
                    self.push_trigger(TriggerKind::ComboFlared, at, None);
                }
            }
        }
    }

    fn schedule_entrance(
        &mut self,
        card: &CardSnapshot,
        zone: ZoneRef,
        from_hand_like: bool,
        new: &GameStateSnapshot,
        layout: &BoardLayout,
    ) {
        let cards = new.zone(zone);
        let Some(index) = slot_of(cards, card.identity) else {
            // The event came from diffing `new`, so the instance must be
            // there; bail instead of animating a phantom slot.
            debug_assert!(false, "entered card missing from its zone");
            return;
        };
        let slot = ZoneSlot::new(zone, index);
        let to = layout.slot_position(slot, cards.len());
        let from = if from_hand_like {
            layout.zone_anchor(ZoneRef::new(zone.side, ZoneKind::Hand))
        } else {
            layout.off_board(zone.side)
        };

        self.schedule(
            EffectKey {
                target: EffectTarget::Card {
                    card: card.identity,
                    slot,
                },
                kind: EffectKind::Entrance,
            },
            self.config.entrance_secs,
            Motion::Slide {
                from,
                to,
                ease: EaseFunction::QuadraticOut,
            },
        );
        self.push_trigger(TriggerKind::CardPlaced, to, Some(card.rarity));

        if card.category == CardCategory::UniqueEffect {
            self.schedule(
                EffectKey {
                    target: EffectTarget::Card {
                        card: card.identity,
                        slot,
                    },
                    kind: EffectKind::UniqueReveal,
                },
                self.config.reveal_secs,
                Motion::FlyToCenter {
                    from: to,
                    center: layout.center(),
                },
            );
            self.push_trigger(TriggerKind::UniqueRevealed, layout.center(), Some(card.rarity));
        }
    }

    fn schedule_exit(
        &mut self,
        card: &CardSnapshot,
        zone: ZoneRef,
        old: Option<&GameStateSnapshot>,
        layout: &BoardLayout,
    ) {
        let (index, count) = old
            .and_then(|o| {
                let cards = o.zone(zone);
                slot_of(cards, card.identity).map(|i| (i, cards.len()))
            })
            .unwrap_or((0, 1));
        let slot = ZoneSlot::new(zone, index);
        let from = layout.slot_position(slot, count);

        self.schedule(
            EffectKey {
                target: EffectTarget::Card {
                    card: card.identity,
                    slot,
                },
                kind: EffectKind::Exit,
            },
            self.config.exit_secs,
            Motion::DropOut { from, fall: 40.0 },
        );
        self.push_trigger(TriggerKind::CardRemoved, from, Some(card.rarity));
    }

    fn schedule_power_delta(
        &mut self,
        card: &CardSnapshot,
        zone: ZoneRef,
        delta: i32,
        new: &GameStateSnapshot,
        layout: &BoardLayout,
    ) {
        let cards = new.zone(zone);
        let Some(index) = slot_of(cards, card.identity) else {
            debug_assert!(false, "power-changed card missing from its zone");
            return;
        };
        let slot = ZoneSlot::new(zone, index);
        let at = layout.slot_position(slot, cards.len());

        self.schedule(
            EffectKey {
                target: EffectTarget::Card {
                    card: card.identity,
                    slot,
                },
                kind: EffectKind::PowerDelta,
            },
            self.config.power_delta_secs,
            Motion::FloatUp {
                from: at,
                rise: 60.0,
                delta,
            },
        );
        let kind = if delta >= 0 {
            TriggerKind::PowerRaised
        } else {
            TriggerKind::PowerLowered
        };
        self.push_trigger(kind, at, Some(card.rarity));
    }

    fn schedule(&mut self, key: EffectKey, duration: f32, motion: Motion) {
        if let Some(existing) = self.active.iter_mut().find(|e| e.key == key) {
            // The same logical effect rescheduled before completing:
            // replace in place, never run it concurrently with itself.
            existing.elapsed = 0.0;
            existing.duration = duration;
            existing.motion = motion;
            return;
        }

        if self.active.len() >= self.config.max_active {
            // Evict whichever effect is closest to done; visual continuity
            // matters more than finishing every animation precisely.
            let mut victim = 0;
            for (i, effect) in self.active.iter().enumerate() {
                if effect.remaining() < self.active[victim].remaining() {
                    victim = i;
                }
            }
            let evicted = self.active.remove(victim);
            debug!(key = ?evicted.key, "effect cap reached, evicting");
        }

        self.active.push(ActiveEffect {
            key,
            elapsed: 0.0,
            duration,
            motion,
        });
    }

    fn push_trigger(&mut self, kind: TriggerKind, position: Vec2, rarity: Option<Rarity>) {
        self.triggers.push(PresentationTrigger {
            kind,
            position,
            rarity,
        });
    }

    /// Ticks every active effect's local clock, removes the elapsed ones,
    /// and advances ambient emission.
    pub fn advance(&mut self, dt: Duration) {
        let dt = dt.as_secs_f32();
        for effect in &mut self.active {
            effect.elapsed += dt;
        }
        self.active.retain(|e| !e.finished());
        self.ambient.advance(dt);
    }

    /// Current animated transform of a card in a zone, if any effect
    /// drives it. Falling back to the static layout is the caller's job.
    pub fn transform_of(&self, card: CardIdentity, zone: ZoneRef) -> Option<CardTransform> {
        const PRECEDENCE: [EffectKind; 3] = [
            EffectKind::UniqueReveal,
            EffectKind::Entrance,
            EffectKind::Exit,
        ];
        for kind in PRECEDENCE {
            let found = self.active.iter().find(|e| {
                e.key.kind == kind
                    && matches!(
                        e.key.target,
                        EffectTarget::Card { card: c, slot } if c == card && slot.zone == zone
                    )
            });
            if let Some(effect) = found {
                return Some(effect.motion.transform_at(effect.progress()));
            }
        }
        None
    }

    pub fn power_deltas(&self) -> Vec<PowerDeltaView> {
        self.active
            .iter()
            .filter_map(|e| match (&e.key.target, &e.motion) {
                (EffectTarget::Card { card, slot }, Motion::FloatUp { delta, .. })
                    if e.key.kind == EffectKind::PowerDelta =>
                {
                    Some(PowerDeltaView {
                        card: *card,
                        zone: slot.zone,
                        delta: *delta,
                        transform: e.motion.transform_at(e.progress()),
                    })
                }
                _ => None,
            })
            .collect()
    }

    pub fn has_effect(&self, key: &EffectKey) -> bool {
        self.active.iter().any(|e| e.key == *key)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn drain_triggers(&mut self) -> Vec<PresentationTrigger> {
        std::mem::take(&mut self.triggers)
    }

    pub fn ambient(&self) -> &AmbientParticles {
        &self.ambient
    }
}

fn slot_of(cards: &[CardSnapshot], identity: CardIdentity) -> Option<usize> {
    cards.iter().position(|c| c.identity == identity)
}
