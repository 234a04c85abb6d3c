use super::{MoveAccumulator, MoveRules};
use crate::board::{Move, Piece, Position, Square, PROMOTION_PIECES};

impl Position {
    pub(crate) fn pawn_moves(&self, from: Square, rules: &MoveRules, acc: &mut MoveAccumulator) {
        let color = self.side_to_move();
        let dir = color.pawn_direction();
        let r = from.rank() as isize;
        let f = from.file() as isize;

        let forward_r = r + dir;
        if (0..8).contains(&forward_r) {
            let forward = Square(forward_r as usize, from.file());
            if self.is_empty_square(forward) {
                self.push_pawn_move(from, forward, false, rules, acc);
                if from.rank() == color.pawn_start_rank() {
                    let double = Square((r + 2 * dir) as usize, from.file());
                    if self.is_empty_square(double) {
                        acc.push(Move::new(from, double), false);
                    }
                }
            }

            for df in [-1, 1] {
                let capture_f = f + df;
                if !(0..8).contains(&capture_f) {
                    continue;
                }
                let target = Square(forward_r as usize, capture_f as usize);
                if let Some((target_color, _)) = self.piece_at(target) {
                    if target_color != color {
                        self.push_pawn_move(from, target, true, rules, acc);
                    }
                } else if rules.en_passant && self.en_passant_target == Some(target) {
                    acc.push(Move::new(from, target), true);
                }
            }
        }
    }

    /// Push a pawn move, fanning out over promotion pieces on the last
    /// rank.
    fn push_pawn_move(
        &self,
        from: Square,
        to: Square,
        capture: bool,
        rules: &MoveRules,
        acc: &mut MoveAccumulator,
    ) {
        let color = self.side_to_move();
        if to.rank() == color.pawn_promotion_rank() {
            if rules.force_queen {
                acc.push(Move::promoting(from, to, Piece::Queen), capture);
            } else {
                for promo in PROMOTION_PIECES {
                    acc.push(Move::promoting(from, to, promo), capture);
                }
            }
        } else {
            acc.push(Move::new(from, to), capture);
        }
    }
}
