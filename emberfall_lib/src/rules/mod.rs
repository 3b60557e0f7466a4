use serde::{Deserialize, Serialize};

pub mod cards;
pub mod player_actions;
mod snapshot;
mod zones;

pub use snapshot::{GameStateSnapshot, LeaderState, SideState};
pub use zones::{Cards, ZoneKind, ZoneRef, ZoneSlot};

/// A player as seen from one client's point of view. Snapshots are
/// per-viewer values, so sides are addressed relative to the viewer.
#[derive(Serialize, Deserialize, Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum PlayerRef {
    Local,
    Remote,
}

impl PlayerRef {
    pub const BOTH: [PlayerRef; 2] = [PlayerRef::Local, PlayerRef::Remote];

    pub fn opponent(self) -> Self {
        match self {
            PlayerRef::Local => PlayerRef::Remote,
            PlayerRef::Remote => PlayerRef::Local,
        }
    }
}

#[derive(Serialize, Deserialize, Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum WeatherKind {
    Clear,
    Frost,
    Fog,
    Downpour,
}
