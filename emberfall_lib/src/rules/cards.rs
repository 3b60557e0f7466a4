use serde::{Deserialize, Serialize};

/// Opaque stable card identifier, assigned by the server's card registry.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u32);

/// One concrete card instance. The same `CardId` can legally appear more
/// than once in a zone; `occurrence` disambiguates the copies and stays
/// stable across snapshots for the same logical instance.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CardIdentity {
    pub id: CardId,
    pub occurrence: u32,
}

impl CardIdentity {
    pub fn new(id: CardId, occurrence: u32) -> Self {
        Self { id, occurrence }
    }
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CardCategory {
    Creature,
    InstantEffect,
    UniqueEffect,
}

/// Opaque faction tag; resolution to a displayable faction is the card
/// registry's concern.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FactionTag(pub u16);

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct CardSnapshot {
    pub identity: CardIdentity,
    pub base_power: i32,
    pub rarity: Rarity,
    pub category: CardCategory,
    pub faction: FactionTag,
}
