use crate::rules::cards::CardId;
use crate::rules::zones::ZoneKind;
use serde::{Deserialize, Serialize};

/// Outbound requests produced by input handling. Fire-and-forget: the next
/// pushed snapshot is the only acknowledgment, and legality is entirely the
/// rules engine's call.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameAction {
    PlayCard { card: CardId, target_row: ZoneKind },
    Pass,
    UseLeaderAbility,
    Surrender,
}
