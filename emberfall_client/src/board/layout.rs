use crate::geom::Vec2;
use emberfall_lib::rules::cards::CardIdentity;
use emberfall_lib::rules::{PlayerRef, ZoneKind, ZoneRef, ZoneSlot};

/// Static board geometry: where a card rests when nothing animates it.
///
/// Rows are stacked vertically, the local side below the center line and
/// the remote side mirrored above it; cards spread horizontally along an
/// eased breadth that widens with the card count.
#[derive(Debug, Clone)]
pub struct BoardLayout {
    /// Widest horizontal spread of a row.
    pub max_breadth: f32,
    /// Card count at which a row reaches the max breadth.
    pub max_breadth_cards: i32,
    /// Vertical distance between adjacent rows.
    pub row_pitch: f32,
    /// Horizontal offset of the discard pile from the board center.
    pub discard_x: f32,
    /// Where cards come from when they enter without a hand origin.
    pub off_board_x: f32,
    /// Half extents of a card sprite, for hit testing.
    pub card_half_size: Vec2,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            max_breadth: 900.0,
            max_breadth_cards: 10,
            row_pitch: 130.0,
            discard_x: 640.0,
            off_board_x: -820.0,
            card_half_size: Vec2::new(46.0, 64.0),
        }
    }
}

impl BoardLayout {
    /// Resting position of the slot at `index` in a zone currently holding
    /// `count` cards.
    pub fn slot_position(&self, slot: ZoneSlot, count: usize) -> Vec2 {
        let anchor = self.zone_anchor(slot.zone);
        anchor + Vec2::new(self.spread_x(slot.index, count), 0.0)
    }

    pub fn zone_anchor(&self, zone: ZoneRef) -> Vec2 {
        // Positive y grows toward the local player's edge.
        let row_y = match zone.kind {
            ZoneKind::Melee => 0.5,
            ZoneKind::Ranged => 1.5,
            ZoneKind::Siege => 2.5,
            ZoneKind::Hand => 3.8,
            ZoneKind::Discard => 2.5,
        } * self.row_pitch;
        let y = match zone.side {
            PlayerRef::Local => row_y,
            PlayerRef::Remote => -row_y,
        };
        let x = match zone.kind {
            ZoneKind::Discard => self.discard_x,
            _ => 0.0,
        };
        Vec2::new(x, y)
    }

    /// Board center, where unique-effect reveals and outcome modals land.
    pub fn center(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Origin for cards entering a zone with no visible source (deck draws,
    /// spawned tokens).
    pub fn off_board(&self, side: PlayerRef) -> Vec2 {
        let y = match side {
            PlayerRef::Local => self.row_pitch * 2.0,
            PlayerRef::Remote => -self.row_pitch * 2.0,
        };
        Vec2::new(self.off_board_x, y)
    }

    fn spread_x(&self, i: usize, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        // calculate the row breadth using the quadratic out function.
        let p = (((count - 1) as f32) / ((self.max_breadth_cards - 1) as f32)).clamp(0.0, 1.0);
        let eased = -(p * (p - 2.0));
        let breadth = self.max_breadth * eased;

        -breadth / 2.0
            + breadth
                * (if count <= 1 {
                    0.0
                } else {
                    (i as f32) / ((count - 1) as f32)
                })
    }

    /// Pure hit test over this frame's computed transforms. `hits` must be
    /// given in draw order; among overlapping cards the topmost (last
    /// drawn) wins. Recomputed per frame, no retained hover state.
    pub fn card_at(
        &self,
        pointer: Vec2,
        hits: impl IntoIterator<Item = (CardIdentity, Vec2, f32)>,
    ) -> Option<CardIdentity> {
        let mut found = None;
        for (card, position, scale) in hits {
            let half = self.card_half_size * scale;
            if (pointer.x - position.x).abs() <= half.x && (pointer.y - position.y).abs() <= half.y
            {
                found = Some(card);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberfall_lib::rules::cards::CardId;

    #[test]
    fn single_card_rests_on_the_row_anchor() {
        let layout = BoardLayout::default();
        let zone = ZoneRef::new(PlayerRef::Local, ZoneKind::Melee);
        let pos = layout.slot_position(ZoneSlot::new(zone, 0), 1);
        assert_eq!(pos, layout.zone_anchor(zone));
    }

    #[test]
    fn spread_is_symmetric_around_the_anchor() {
        let layout = BoardLayout::default();
        let zone = ZoneRef::new(PlayerRef::Local, ZoneKind::Ranged);
        let left = layout.slot_position(ZoneSlot::new(zone, 0), 5);
        let right = layout.slot_position(ZoneSlot::new(zone, 4), 5);
        assert!((left.x + right.x).abs() < 1e-3);
        assert_eq!(left.y, right.y);
    }

    #[test]
    fn sides_mirror_vertically() {
        let layout = BoardLayout::default();
        let local = layout.zone_anchor(ZoneRef::new(PlayerRef::Local, ZoneKind::Siege));
        let remote = layout.zone_anchor(ZoneRef::new(PlayerRef::Remote, ZoneKind::Siege));
        assert_eq!(local.y, -remote.y);
    }

    #[test]
    fn topmost_card_wins_the_hit_test() {
        let layout = BoardLayout::default();
        let under = CardIdentity::new(CardId(1), 0);
        let over = CardIdentity::new(CardId(2), 0);
        let hit = layout.card_at(
            Vec2::ZERO,
            vec![(under, Vec2::ZERO, 1.0), (over, Vec2::new(10.0, 0.0), 1.0)],
        );
        assert_eq!(hit, Some(over));

        let miss = layout.card_at(Vec2::new(5000.0, 0.0), vec![(under, Vec2::ZERO, 1.0)]);
        assert_eq!(miss, None);
    }
}
