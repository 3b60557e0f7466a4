//! End-to-end reconciliation flow: snapshots posted through the inbox,
//! pumped once per frame, effects advanced, and render queries answered.

use emberfall_client::effects::TriggerKind;
use emberfall_client::geom::Vec2;
use emberfall_client::networking::snapshot_channel;
use emberfall_client::{BoardReconciler, CardDisplay, CardRegistry, PresentationConfig};
use emberfall_lib::rules::cards::{
    CardCategory, CardId, CardIdentity, CardSnapshot, FactionTag, Rarity,
};
use emberfall_lib::rules::{
    GameStateSnapshot, PlayerRef, SideState, WeatherKind, ZoneKind, ZoneRef, ZoneSlot,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

struct FixedRegistry;

impl CardRegistry for FixedRegistry {
    fn resolve(&self, id: CardId) -> Option<CardDisplay> {
        (id == CardId(1)).then(|| CardDisplay {
            name: "Ashen Vanguard".to_string(),
            art_tag: "ashen_vanguard".to_string(),
        })
    }
}

fn creature(id: u32, base_power: i32) -> CardSnapshot {
    CardSnapshot {
        identity: CardIdentity::new(CardId(id), 0),
        base_power,
        rarity: Rarity::Common,
        category: CardCategory::Creature,
        faction: FactionTag(0),
    }
}

fn base_snapshot() -> GameStateSnapshot {
    GameStateSnapshot {
        local: SideState::default(),
        remote: SideState::default(),
        current_turn: PlayerRef::Local,
        remaining_turn_seconds: 90,
        weather: WeatherKind::Clear,
        power_modifiers: vec![],
        match_ended: false,
        winner: None,
    }
}

#[test]
fn a_played_card_animates_then_comes_to_rest() {
    let mut reconciler =
        BoardReconciler::new(Arc::new(FixedRegistry), PresentationConfig::default());
    let (post, mut inbox) = snapshot_channel();
    let t0 = Instant::now();

    let x = creature(1, 5);
    let y = creature(2, 3);

    // Initial load: both cards in hand, nothing on the board.
    let mut first = base_snapshot();
    first.local.hand = vec![x, y];
    assert!(post.post(1, first));
    assert!(reconciler.pump(&mut inbox, t0));

    // The initial snapshot is baseline: no effects, no cues.
    assert!(reconciler.drain_triggers().is_empty());
    assert_eq!(reconciler.query().remaining_seconds(), 90);

    let hand = ZoneRef::new(PlayerRef::Local, ZoneKind::Hand);
    let resting_in_hand = reconciler
        .query()
        .transform_of(x.identity, hand)
        .expect("card is in hand");
    assert_eq!(resting_in_hand.opacity, 1.0);

    // X gets played to the melee row. A stale duplicate of the first
    // delivery arrives late and must be ignored.
    let mut second = base_snapshot();
    second.local.hand = vec![y];
    second.local.melee = vec![x];
    assert!(post.post(2, second));
    assert!(!post.post(1, base_snapshot()));

    let frame = t0 + Duration::from_millis(16);
    assert!(reconciler.pump(&mut inbox, frame));
    assert!(!reconciler.pump(&mut inbox, frame), "only one pending snapshot");

    let triggers = reconciler.drain_triggers();
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].kind, TriggerKind::CardPlaced);
    assert_eq!(triggers[0].rarity, Some(Rarity::Common));

    // While the entrance runs, the card starts from the hand anchor...
    let melee = ZoneRef::new(PlayerRef::Local, ZoneKind::Melee);
    let animated = reconciler
        .query()
        .transform_of(x.identity, melee)
        .expect("entrance effect is active");
    let layout = PresentationConfig::default().layout;
    assert_eq!(animated.position, layout.zone_anchor(hand));

    // ...and after the effect elapses it rests on its layout slot.
    reconciler.advance(Duration::from_secs(2), frame + Duration::from_secs(2));
    let resting = reconciler
        .query()
        .transform_of(x.identity, melee)
        .expect("card is on the board");
    assert_eq!(
        resting.position,
        layout.slot_position(ZoneSlot::new(melee, 0), 1)
    );
    assert_eq!(resting.opacity, 1.0);

    // The pointer finds the card on its resting slot, topmost first.
    let hit = reconciler.query().card_at(resting.position);
    assert_eq!(hit, Some(x.identity));
    assert_eq!(reconciler.query().card_at(Vec2::new(9e4, 9e4)), None);

    // Display metadata resolves through the injected registry.
    assert!(reconciler.query().display_of(CardId(1)).is_some());
    assert!(reconciler.query().display_of(CardId(999)).is_none());
}

#[test]
fn turn_handover_resets_the_clock_exactly() {
    let mut reconciler =
        BoardReconciler::new(Arc::new(FixedRegistry), PresentationConfig::default());
    let (post, mut inbox) = snapshot_channel();
    let t0 = Instant::now();

    assert!(post.post(1, base_snapshot()));
    assert!(reconciler.pump(&mut inbox, t0));

    // Local countdown runs between snapshots.
    reconciler.advance(Duration::from_secs(4), t0 + Duration::from_secs(4));
    assert_eq!(reconciler.query().remaining_seconds(), 86);

    // Handover: the new turn's budget applies verbatim.
    let mut handover = base_snapshot();
    handover.current_turn = PlayerRef::Remote;
    handover.remaining_turn_seconds = 60;
    assert!(post.post(2, handover));
    assert!(reconciler.pump(&mut inbox, t0 + Duration::from_secs(4)));
    assert_eq!(reconciler.query().remaining_seconds(), 60);

    let triggers = reconciler.drain_triggers();
    assert!(triggers.iter().any(|t| t.kind == TriggerKind::TurnPassed));
}

#[test]
fn weather_shift_switches_ambient_emission() {
    let mut reconciler =
        BoardReconciler::new(Arc::new(FixedRegistry), PresentationConfig::default());
    let (post, mut inbox) = snapshot_channel();
    let t0 = Instant::now();

    assert!(post.post(1, base_snapshot()));
    assert!(reconciler.pump(&mut inbox, t0));
    reconciler.advance(Duration::from_secs(1), t0 + Duration::from_secs(1));
    assert!(reconciler.query().particles().is_empty());

    let mut frosted = base_snapshot();
    frosted.weather = WeatherKind::Frost;
    assert!(post.post(2, frosted));
    assert!(reconciler.pump(&mut inbox, t0 + Duration::from_secs(1)));

    let triggers = reconciler.drain_triggers();
    assert!(triggers
        .iter()
        .any(|t| t.kind == TriggerKind::WeatherShifted));

    reconciler.advance(
        Duration::from_millis(500),
        t0 + Duration::from_millis(1500),
    );
    assert!(!reconciler.query().particles().is_empty());
}
