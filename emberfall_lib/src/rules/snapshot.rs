use crate::rules::cards::{CardIdentity, CardSnapshot};
use crate::rules::zones::{Cards, ZoneKind, ZoneRef};
use crate::rules::{PlayerRef, WeatherKind};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LeaderState {
    pub card: CardSnapshot,
    pub used: bool,
}

/// One player's half of the board. The remote hand carries revealed cards
/// only; `hidden_hand_count` is the size of the unseen remainder, kept so
/// card backs can still be rendered.
///
/// Absent zone lists deserialize as empty: a partially-hidden side is a
/// legitimate shape, never a fault.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SideState {
    pub hand: Cards,
    pub melee: Cards,
    pub ranged: Cards,
    pub siege: Cards,
    pub discard: Cards,
    pub hidden_hand_count: usize,

    pub leader: Option<LeaderState>,
    pub round_score: u32,
    pub rounds_won: u8,
    pub passed: bool,
}

impl SideState {
    pub fn zone(&self, kind: ZoneKind) -> &[CardSnapshot] {
        match kind {
            ZoneKind::Hand => &self.hand,
            ZoneKind::Melee => &self.melee,
            ZoneKind::Ranged => &self.ranged,
            ZoneKind::Siege => &self.siege,
            ZoneKind::Discard => &self.discard,
        }
    }
}

/// A complete description of match state at one instant, produced by the
/// rules engine and never mutated by the client; every update is a brand
/// new snapshot compared against the previous one.
///
/// The power-modifier table is a pair list rather than a map because the
/// wire format is JSON lines and JSON object keys must be strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameStateSnapshot {
    pub local: SideState,
    pub remote: SideState,
    pub current_turn: PlayerRef,
    pub remaining_turn_seconds: u32,
    pub weather: WeatherKind,
    #[serde(default)]
    pub power_modifiers: Vec<(CardIdentity, i32)>,
    pub match_ended: bool,
    pub winner: Option<PlayerRef>,
}

impl GameStateSnapshot {
    pub fn side(&self, side: PlayerRef) -> &SideState {
        match side {
            PlayerRef::Local => &self.local,
            PlayerRef::Remote => &self.remote,
        }
    }

    pub fn zone(&self, zone: ZoneRef) -> &[CardSnapshot] {
        self.side(zone.side).zone(zone.kind)
    }

    pub fn power_modifier(&self, identity: CardIdentity) -> i32 {
        self.power_modifiers
            .iter()
            .find(|(id, _)| *id == identity)
            .map(|(_, delta)| *delta)
            .unwrap_or(0)
    }

    /// Declared base power plus the server-computed modifier, floored at
    /// zero. Weather zeroing and similar rules arrive pre-applied through
    /// the modifier table.
    pub fn effective_power(&self, card: &CardSnapshot) -> i32 {
        (card.base_power + self.power_modifier(card.identity)).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::cards::{CardCategory, CardId, FactionTag, Rarity};

    fn creature(id: u32, occurrence: u32, base_power: i32) -> CardSnapshot {
        CardSnapshot {
            identity: CardIdentity::new(CardId(id), occurrence),
            base_power,
            rarity: Rarity::Common,
            category: CardCategory::Creature,
            faction: FactionTag(0),
        }
    }

    #[test]
    fn modifier_defaults_to_zero() {
        let snapshot = GameStateSnapshot {
            local: SideState::default(),
            remote: SideState::default(),
            current_turn: PlayerRef::Local,
            remaining_turn_seconds: 90,
            weather: WeatherKind::Clear,
            power_modifiers: vec![],
            match_ended: false,
            winner: None,
        };
        let card = creature(7, 0, 5);
        assert_eq!(snapshot.effective_power(&card), 5);
    }

    #[test]
    fn effective_power_floors_at_zero() {
        let card = creature(7, 0, 3);
        let snapshot = GameStateSnapshot {
            local: SideState::default(),
            remote: SideState::default(),
            current_turn: PlayerRef::Local,
            remaining_turn_seconds: 90,
            weather: WeatherKind::Frost,
            power_modifiers: vec![(card.identity, -10)],
            match_ended: false,
            winner: None,
        };
        assert_eq!(snapshot.effective_power(&card), 0);
    }
}
