use once_cell::sync::Lazy;

use super::MoveAccumulator;
use crate::board::{Move, Position, Square};

/// King target squares per origin. There is no castling and no check in
/// this variant; the king steps like any short-range piece.
static KING_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    std::array::from_fn(|idx| {
        let sq = Square::from_index(idx);
        let r = sq.rank() as isize;
        let f = sq.file() as isize;
        let mut targets = Vec::with_capacity(8);
        for dr in -1..=1 {
            for df in -1..=1 {
                if dr == 0 && df == 0 {
                    continue;
                }
                let (tr, tf) = (r + dr, f + df);
                if (0..8).contains(&tr) && (0..8).contains(&tf) {
                    targets.push(Square(tr as usize, tf as usize));
                }
            }
        }
        targets
    })
});

impl Position {
    pub(crate) fn king_moves(&self, from: Square, acc: &mut MoveAccumulator) {
        let color = self.side_to_move();
        for &to in &KING_TARGETS[from.as_index()] {
            match self.piece_at(to) {
                None => acc.push(Move::new(from, to), false),
                Some((target_color, _)) if target_color != color => {
                    acc.push(Move::new(from, to), true);
                }
                Some(_) => {}
            }
        }
    }
}
