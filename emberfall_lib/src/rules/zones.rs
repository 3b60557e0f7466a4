use crate::rules::cards::CardSnapshot;
use crate::rules::PlayerRef;
use serde::{Deserialize, Serialize};

pub type Cards = Vec<CardSnapshot>;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    Hand,
    Melee,
    Ranged,
    Siege,
    Discard,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 5] = [
        ZoneKind::Hand,
        ZoneKind::Melee,
        ZoneKind::Ranged,
        ZoneKind::Siege,
        ZoneKind::Discard,
    ];

    pub fn is_battle_row(self) -> bool {
        matches!(self, ZoneKind::Melee | ZoneKind::Ranged | ZoneKind::Siege)
    }
}

/// One side's zone of one kind. Zone contents are an ordered card sequence;
/// order is the rendering slot order, not part of diff identity.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ZoneRef {
    pub side: PlayerRef,
    pub kind: ZoneKind,
}

impl ZoneRef {
    pub fn new(side: PlayerRef, kind: ZoneKind) -> Self {
        Self { side, kind }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ZoneSlot {
    pub zone: ZoneRef,
    pub index: usize,
}

impl ZoneSlot {
    pub fn new(zone: ZoneRef, index: usize) -> Self {
        Self { zone, index }
    }
}
