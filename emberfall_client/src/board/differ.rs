use emberfall_lib::rules::cards::{CardId, CardSnapshot};
use emberfall_lib::rules::{GameStateSnapshot, PlayerRef, SideState, WeatherKind, ZoneKind, ZoneRef};
use std::collections::HashMap;

/// A typed fact derived by comparing two consecutive snapshots.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffEvent {
    Entered {
        card: CardSnapshot,
        zone: ZoneRef,
        /// The card's identity simultaneously vanished from the same
        /// side's hand, so this entrance is a play, not a spawn.
        from_hand_like: bool,
    },
    Left {
        card: CardSnapshot,
        zone: ZoneRef,
    },
    PowerChanged {
        card: CardSnapshot,
        zone: ZoneRef,
        old_power: i32,
        new_power: i32,
    },
    TurnChanged {
        from: PlayerRef,
        to: PlayerRef,
    },
    WeatherChanged {
        from: WeatherKind,
        to: WeatherKind,
    },
    MatchEnded {
        winner: Option<PlayerRef>,
    },
}

/// Compares two snapshots zone by zone and derives what happened between
/// them. Pure: identical inputs always yield the identical event list, in
/// a deterministic order (local side first, zones in declaration order,
/// instances in slot order, then the global events).
///
/// A `None` old snapshot is the initial load: everything in `new` is
/// treated as already present and no events are produced, so joining a
/// match never triggers an animation burst.
pub fn diff(old: Option<&GameStateSnapshot>, new: &GameStateSnapshot) -> Vec<DiffEvent> {
    let Some(old) = old else {
        return Vec::new();
    };

    let mut events = Vec::new();
    for side in PlayerRef::BOTH {
        diff_side(old, new, side, &mut events);
    }

    if old.current_turn != new.current_turn {
        events.push(DiffEvent::TurnChanged {
            from: old.current_turn,
            to: new.current_turn,
        });
    }
    if old.weather != new.weather {
        events.push(DiffEvent::WeatherChanged {
            from: old.weather,
            to: new.weather,
        });
    }
    if !old.match_ended && new.match_ended {
        events.push(DiffEvent::MatchEnded { winner: new.winner });
    }

    events
}

fn diff_side(
    old_snap: &GameStateSnapshot,
    new_snap: &GameStateSnapshot,
    side: PlayerRef,
    events: &mut Vec<DiffEvent>,
) {
    let old_side = old_snap.side(side);
    let new_side = new_snap.side(side);

    // Hand departures that reappear in another zone of the same side are
    // plays: they animate as a single move, never as a vanish-plus-spawn.
    // Each moved copy suppresses one hand Left and marks one Entered.
    let moved = hand_moves(old_side, new_side);
    let mut suppress_left = moved.clone();
    let mut mark_entered = moved;

    for kind in ZoneKind::ALL {
        let zone = ZoneRef::new(side, kind);
        let old_cards = old_side.zone(kind);
        let new_cards = new_side.zone(kind);
        let old_counts = counts_by_id(old_cards);
        let new_counts = counts_by_id(new_cards);

        // Departures: per identity, the trailing excess instances of the
        // old sequence are the ones that left (append-only growth holds
        // symmetrically for shrinkage).
        let mut old_ordinals: HashMap<CardId, usize> = HashMap::new();
        for card in old_cards {
            let id = card.identity.id;
            let ordinal = bump(&mut old_ordinals, id);
            if ordinal >= count_of(&new_counts, id) {
                if kind == ZoneKind::Hand && take_one(&mut suppress_left, id) {
                    continue;
                }
                events.push(DiffEvent::Left { card: *card, zone });
            }
        }

        // Entrances and power changes, in slot order. Power is compared
        // pairwise by per-identity ordinal, and only when the identity's
        // count is unchanged; a changed count already animates as an
        // entrance or departure.
        let mut old_positions: HashMap<CardId, Vec<usize>> = HashMap::new();
        for (i, card) in old_cards.iter().enumerate() {
            old_positions.entry(card.identity.id).or_default().push(i);
        }

        let mut new_ordinals: HashMap<CardId, usize> = HashMap::new();
        for card in new_cards {
            let id = card.identity.id;
            let ordinal = bump(&mut new_ordinals, id);
            let old_count = count_of(&old_counts, id);

            if ordinal >= old_count {
                let from_hand_like = kind != ZoneKind::Hand && take_one(&mut mark_entered, id);
                events.push(DiffEvent::Entered {
                    card: *card,
                    zone,
                    from_hand_like,
                });
            } else if old_count == count_of(&new_counts, id) {
                let old_inst = &old_cards[old_positions[&id][ordinal]];
                let old_power = old_snap.effective_power(old_inst);
                let new_power = new_snap.effective_power(card);
                if old_power != new_power {
                    events.push(DiffEvent::PowerChanged {
                        card: *card,
                        zone,
                        old_power,
                        new_power,
                    });
                }
            }
        }
    }
}

/// Per identity, how many copies lost from the hand can be explained by
/// gains in the same side's other zones.
fn hand_moves(old_side: &SideState, new_side: &SideState) -> HashMap<CardId, usize> {
    let mut gains: HashMap<CardId, usize> = HashMap::new();
    for kind in [
        ZoneKind::Melee,
        ZoneKind::Ranged,
        ZoneKind::Siege,
        ZoneKind::Discard,
    ] {
        let old_there = counts_by_id(old_side.zone(kind));
        let new_there = counts_by_id(new_side.zone(kind));
        for (&id, &n) in &new_there {
            let gained = n.saturating_sub(count_of(&old_there, id));
            if gained > 0 {
                *gains.entry(id).or_insert(0) += gained;
            }
        }
    }

    let old_hand = counts_by_id(old_side.zone(ZoneKind::Hand));
    let new_hand = counts_by_id(new_side.zone(ZoneKind::Hand));

    let mut moved = HashMap::new();
    for (&id, &old_count) in &old_hand {
        let lost = old_count.saturating_sub(count_of(&new_hand, id));
        let explained = lost.min(count_of(&gains, id));
        if explained > 0 {
            moved.insert(id, explained);
        }
    }
    moved
}

fn counts_by_id(cards: &[CardSnapshot]) -> HashMap<CardId, usize> {
    let mut counts = HashMap::new();
    for card in cards {
        *counts.entry(card.identity.id).or_insert(0) += 1;
    }
    counts
}

fn count_of(counts: &HashMap<CardId, usize>, id: CardId) -> usize {
    counts.get(&id).copied().unwrap_or(0)
}

fn bump(ordinals: &mut HashMap<CardId, usize>, id: CardId) -> usize {
    let entry = ordinals.entry(id).or_insert(0);
    let ordinal = *entry;
    *entry += 1;
    ordinal
}

fn take_one(pool: &mut HashMap<CardId, usize>, id: CardId) -> bool {
    match pool.get_mut(&id) {
        Some(n) if *n > 0 => {
            *n -= 1;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberfall_lib::rules::cards::{CardCategory, CardIdentity, FactionTag, Rarity};

    fn card(id: u32, occurrence: u32, base_power: i32) -> CardSnapshot {
        CardSnapshot {
            identity: CardIdentity::new(CardId(id), occurrence),
            base_power,
            rarity: Rarity::Common,
            category: CardCategory::Creature,
            faction: FactionTag(0),
        }
    }

    fn snapshot() -> GameStateSnapshot {
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
    fn identical_snapshots_diff_to_nothing() {
        let mut state = snapshot();
        state.local.melee = vec![card(1, 0, 4), card(2, 0, 6)];
        state.local.hand = vec![card(3, 0, 2)];
        assert!(diff(Some(&state), &state).is_empty());
    }

    #[test]
    fn first_snapshot_produces_no_events() {
        let mut state = snapshot();
        state.local.melee = vec![card(1, 0, 4)];
        state.match_ended = true;
        assert!(diff(None, &state).is_empty());
    }

    #[test]
    fn duplicate_identities_match_by_count() {
        let a0 = card(1, 0, 4);
        let a1 = card(1, 1, 4);
        let b = card(2, 0, 6);

        let mut old = snapshot();
        old.local.melee = vec![a0, a1, b];
        let mut new = snapshot();
        new.local.melee = vec![a0, b];

        let events = diff(Some(&old), &new);
        assert_eq!(
            events,
            vec![DiffEvent::Left {
                card: a1,
                zone: ZoneRef::new(PlayerRef::Local, ZoneKind::Melee),
            }]
        );
    }

    #[test]
    fn playing_a_card_is_one_entrance_not_a_vanish() {
        let x = card(1, 0, 5);
        let y = card(2, 0, 3);

        let mut old = snapshot();
        old.local.hand = vec![x, y];
        let mut new = snapshot();
        new.local.hand = vec![y];
        new.local.melee = vec![x];

        let events = diff(Some(&old), &new);
        assert_eq!(
            events,
            vec![DiffEvent::Entered {
                card: x,
                zone: ZoneRef::new(PlayerRef::Local, ZoneKind::Melee),
                from_hand_like: true,
            }]
        );
    }

    #[test]
    fn drawing_into_hand_is_a_plain_entrance() {
        let x = card(9, 0, 1);
        let old = snapshot();
        let mut new = snapshot();
        new.local.hand = vec![x];

        let events = diff(Some(&old), &new);
        assert_eq!(
            events,
            vec![DiffEvent::Entered {
                card: x,
                zone: ZoneRef::new(PlayerRef::Local, ZoneKind::Hand),
                from_hand_like: false,
            }]
        );
    }

    #[test]
    fn growth_of_an_existing_identity_enters_the_trailing_copy() {
        let a0 = card(1, 0, 4);
        let a1 = card(1, 1, 4);

        let mut old = snapshot();
        old.remote.ranged = vec![a0];
        let mut new = snapshot();
        new.remote.ranged = vec![a0, a1];

        let events = diff(Some(&old), &new);
        assert_eq!(
            events,
            vec![DiffEvent::Entered {
                card: a1,
                zone: ZoneRef::new(PlayerRef::Remote, ZoneKind::Ranged),
                from_hand_like: false,
            }]
        );
    }

    #[test]
    fn modifier_shift_emits_power_changed() {
        let a = card(1, 0, 6);
        let mut old = snapshot();
        old.local.siege = vec![a];
        let mut new = snapshot();
        new.local.siege = vec![a];
        new.power_modifiers = vec![(a.identity, -6)];
        new.weather = WeatherKind::Frost;

        let events = diff(Some(&old), &new);
        assert_eq!(
            events,
            vec![
                DiffEvent::PowerChanged {
                    card: a,
                    zone: ZoneRef::new(PlayerRef::Local, ZoneKind::Siege),
                    old_power: 6,
                    new_power: 0,
                },
                DiffEvent::WeatherChanged {
                    from: WeatherKind::Clear,
                    to: WeatherKind::Frost,
                },
            ]
        );
    }

    #[test]
    fn weather_change_alone_emits_exactly_one_event() {
        let old = snapshot();
        let mut new = snapshot();
        new.weather = WeatherKind::Fog;

        let events = diff(Some(&old), &new);
        assert_eq!(
            events,
            vec![DiffEvent::WeatherChanged {
                from: WeatherKind::Clear,
                to: WeatherKind::Fog,
            }]
        );
    }

    #[test]
    fn turn_change_is_reported() {
        let old = snapshot();
        let mut new = snapshot();
        new.current_turn = PlayerRef::Remote;

        let events = diff(Some(&old), &new);
        assert_eq!(
            events,
            vec![DiffEvent::TurnChanged {
                from: PlayerRef::Local,
                to: PlayerRef::Remote,
            }]
        );
    }

    #[test]
    fn match_end_fires_only_on_the_transition() {
        let old = snapshot();
        let mut ended = snapshot();
        ended.match_ended = true;
        ended.winner = Some(PlayerRef::Remote);

        let events = diff(Some(&old), &ended);
        assert_eq!(
            events,
            vec![DiffEvent::MatchEnded {
                winner: Some(PlayerRef::Remote),
            }]
        );

        // A repeated post-game snapshot must stay silent.
        assert!(diff(Some(&ended), &ended.clone()).is_empty());
    }
}
